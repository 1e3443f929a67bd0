use lumen_core::flag::{abbrev_of, name_of};
use lumen_render::{mask_label, render_with, RenderOptions};
use lumen_seq::Sequence;

/// One decoded step.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DecodedStep {
    pub slot: usize,
    pub flag: u32,
    pub name: &'static str,
    pub abbrev: &'static str,
    pub aux: u8,
}

/// A fully decoded history, ready for printing or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DecodedHistory {
    pub history: String,
    pub auxcode: String,
    pub text: String,
    pub steps: Vec<DecodedStep>,
}

/// Decode every recorded step of `seq`.
pub fn decode(seq: &Sequence, options: &RenderOptions) -> DecodedHistory {
    let steps = (0..seq.num_steps())
        .filter_map(|slot| {
            let flag = seq.flag_at(slot).ok()?;
            let aux = seq.aux_at(slot).ok()?;
            Some(DecodedStep {
                slot,
                flag,
                name: name_of(flag),
                abbrev: abbrev_of(flag),
                aux,
            })
        })
        .collect();

    DecodedHistory {
        history: format!("{:#018x}", seq.history),
        auxcode: format!("{:#018x}", seq.auxcode),
        text: render_with(seq, options),
        steps,
    }
}

/// Format decoded histories as a markdown table.
pub fn format_markdown(decoded: &[DecodedHistory]) -> String {
    let mut out = String::new();
    out.push_str("| History | Auxcode | Steps | Sequence |\n");
    out.push_str("|---------|---------|-------|----------|\n");
    for d in decoded {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            d.history,
            d.auxcode,
            d.steps.len(),
            d.text
        ));
    }
    out
}

/// Format a flag mask as a labelled line.
pub fn format_mask(mask: u32, abbrev: bool) -> String {
    format!("{:#010x} {}", mask, mask_label(mask, abbrev))
}

/// Serialize decoded histories as pretty JSON.
pub fn to_json(decoded: &[DecodedHistory]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(decoded)
}
