use std::io::BufWriter;

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::models::AnalysisEntry;

// US letter, reportlab-style point coordinates.
const PAGE_WIDTH_PT: f64 = 612.0;
const PAGE_HEIGHT_PT: f64 = 792.0;
const MARGIN_X_PT: f64 = 100.0;
const TOP_Y_PT: f64 = 750.0;
const BOTTOM_Y_PT: f64 = 50.0;
const LINE_STEP_PT: f64 = 15.0;
const FONT_SIZE: f64 = 12.0;

const PT_TO_MM: f64 = 0.352_778;

fn pt(value: f64) -> Mm {
    Mm(value * PT_TO_MM)
}

/// Paginated PDF rendering of the analysis. Same fields as the JSON report,
/// one block of lines per record, new page when the cursor runs out.
pub fn render(entries: &[AnalysisEntry]) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Distraction Analysis Report",
        pt(PAGE_WIDTH_PT),
        pt(PAGE_HEIGHT_PT),
        "report",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| anyhow!("failed to register PDF font: {err}"))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_Y_PT;

    draw_line(&layer, &font, &mut y, "Distraction Analysis Report");
    draw_line(&layer, &font, &mut y, &"-".repeat(50));

    for entry in entries {
        for line in entry_lines(entry) {
            if y < BOTTOM_Y_PT {
                let (page, page_layer) = doc.add_page(pt(PAGE_WIDTH_PT), pt(PAGE_HEIGHT_PT), "report");
                layer = doc.get_page(page).get_layer(page_layer);
                y = TOP_Y_PT;
            }
            draw_line(&layer, &font, &mut y, &line);
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|err| anyhow!("failed to encode PDF: {err}"))?;
    writer
        .into_inner()
        .map_err(|err| anyhow!("failed to flush PDF buffer: {err}"))
}

fn draw_line(layer: &PdfLayerReference, font: &IndirectFontRef, y: &mut f64, text: &str) {
    layer.use_text(text, FONT_SIZE, pt(MARGIN_X_PT), pt(*y), font);
    *y -= LINE_STEP_PT;
}

fn entry_lines(entry: &AnalysisEntry) -> Vec<String> {
    match (&entry.transcription, entry.segment_start, entry.segment_end) {
        (Some(text), Some(start), Some(end)) => vec![
            format!("Timestamp: {:.2}s", entry.distraction_timestamp),
            format!("  - Transcription: {}", text.trim()),
            format!("  - Segment: {start:.2}s to {end:.2}s"),
        ],
        _ => vec![
            format!("Timestamp: {:.2}s", entry.distraction_timestamp),
            "  - No matching transcript segment".to_string(),
        ],
    }
}
