// File: ./src/print.rs
//! Print layout: two read-only columns per block, replicated into copies, and the
//! HTML page handed to the host for printing.
use crate::model::Entry;
use crate::row::ReadOnlyRow;
use std::fmt::Write;

/// One physical copy: a left and a right column of read-only rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintBlock {
    pub left: Vec<ReadOnlyRow>,
    pub right: Vec<ReadOnlyRow>,
}

impl PrintBlock {
    fn write_html(&self, out: &mut String, print_only: bool) {
        let class = if print_only { "print print-only" } else { "print" };
        let _ = writeln!(out, "    <article class=\"{}\">", class);
        for column in [&self.left, &self.right] {
            out.push_str("      <ul>\n");
            for row in column {
                let _ = writeln!(out, "        {}", row.to_html());
            }
            out.push_str("      </ul>\n");
        }
        out.push_str("    </article>\n");
    }
}

pub fn render_print_layout(left: &[Entry], right: &[Entry]) -> PrintBlock {
    PrintBlock {
        left: left.iter().map(ReadOnlyRow::from).collect(),
        right: right.iter().map(ReadOnlyRow::from).collect(),
    }
}

/// Renders the layout once and replicates it `copies` times.
pub fn render_print_copies(left: &[Entry], right: &[Entry], copies: usize) -> Vec<PrintBlock> {
    let first = render_print_layout(left, right);
    vec![first; copies]
}

/// Steps shown to the user before printing.
pub fn usage_steps(slice_at: usize) -> Vec<String> {
    vec![
        format!("Add up to {} phone numbers", slice_at * 2),
        "Print (Ctrl+P), or open the written page and print it from your browser".to_string(),
        "Set your page orientation to landscape".to_string(),
        "Make sure you have the scaling set to 100%".to_string(),
        "Turn \"Print backgrounds\" on, otherwise the borders and zebra striping are lost"
            .to_string(),
        "Print the page".to_string(),
        "Cut out each double column block".to_string(),
        "Fold in half along the centre line then unfold".to_string(),
        "Glue the back and refold so the paper is double thickness".to_string(),
        "If you have a laminator, laminate each copy".to_string(),
    ]
}

/// Full printable page. The first block doubles as the on-screen preview; the
/// others only show up in print media.
#[derive(Debug, Clone)]
pub struct PrintDocument {
    pub blocks: Vec<PrintBlock>,
    pub slice_at: usize,
}

impl PrintDocument {
    pub fn new(blocks: Vec<PrintBlock>, slice_at: usize) -> Self {
        Self { blocks, slice_at }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <title>Pocket phone book</title>\n");
        let _ = writeln!(out, "  <style>{}</style>", STYLES);
        out.push_str("</head>\n<body>\n");
        let _ = writeln!(
            out,
            "  <div class=\"wrap\" style=\"--row-count: {}\">",
            self.slice_at
        );

        out.push_str("    <div class=\"ui\">\n      <h1>Pocket phone book</h1>\n");
        out.push_str(
            "      <p>This is for when technology fails us (or those in our care).</p>\n",
        );
        out.push_str("      <ol>\n");
        for step in usage_steps(self.slice_at) {
            let _ = writeln!(out, "        <li>{}</li>", escape_html(&step));
        }
        out.push_str("      </ol>\n    </div>\n");

        for (i, block) in self.blocks.iter().enumerate() {
            block.write_html(&mut out, i > 0);
        }

        out.push_str("  </div>\n</body>\n</html>\n");
        out
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLES: &str = r#"
  * { box-sizing: border-box; }
  body { font-family: sans-serif; }
  .wrap {
    --wrap-border-colour: #000;
    --wrap-border-width: 0.05rem;
    --wrap-width: 26rem;
    --wrap-padding: 0.5rem;
    --wrap-height: calc((var(--row-count) * 2rem) + (var(--wrap-padding) * 2));
    --wrap-font-size: inherit;
    --row-bg: #fff;
    --row-bg-alt: #ddd;
    --row-gap: 0.5rem;
    --phone-width: 6rem;
    display: flex;
    flex-wrap: wrap;
    place-items: center;
    gap: 2rem;
    font-size: var(--wrap-font-size, 1rem);
  }
  ul { list-style-type: none; padding: 0; margin: 0; }
  .ui { max-width: 25rem; }
  .print {
    background-color: #fff;
    border: var(--wrap-border-width) solid var(--wrap-border-colour);
    color: #000;
    display: flex;
    padding: 0;
    width: var(--wrap-width);
    height: var(--wrap-height);
    position: relative;
  }
  .print ul { width: 50%; padding: var(--wrap-padding); }
  .print ul + ul { border-left: var(--wrap-border-width) solid var(--wrap-border-colour); }
  .print li {
    background-color: var(--row-bg);
    display: flex;
    flex-direction: row;
    font-size: var(--wrap-font-size);
    padding: 0.25rem 0.5rem;
    gap: var(--row-gap);
  }
  .print li:nth-child(odd) { --row-bg: var(--row-bg-alt); }
  .print li span { display: block; }
  .name {
    flex-grow: 1;
    font-weight: bold;
    white-space: nowrap;
    overflow: hidden;
  }
  .phone { width: var(--phone-width); text-align: right; }
  .print-only { display: none; }
  @media print {
    .print { --wrap-font-size: 13px; }
    .wrap {
      position: absolute;
      inset: 0;
      justify-content: space-around;
    }
    .ui { display: none; }
    .print-only { display: flex; }
  }
"#;
