use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ideorder::core_types::{Karyotype, Optimize, Score};
use ideorder::optimizer::runner::format_change;
use ideorder::optimizer::{OptimizationResult, RoundKind};
use ideorder::selection::Selection;

/// Green when the score moved the way `optimize` wants, red when it moved against it.
fn change_color(init: Score, final_score: Score, optimize: Optimize) -> Option<Color> {
    if optimize.is_better(final_score, init) {
        Some(Color::Green)
    } else if optimize.is_better(init, final_score) {
        Some(Color::Red)
    } else {
        None
    }
}

fn change_cell(init: Score, final_score: Score, optimize: Optimize) -> Cell {
    let cell = Cell::new(format_change(init, final_score)).set_alignment(CellAlignment::Right);
    match change_color(init, final_score, optimize) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

/// Per-round table plus the overall change. Written to stderr so stdout
/// carries only the order.
pub fn print_round_report(result: &OptimizationResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Round").add_attribute(Attribute::Bold),
        Cell::new("Kind"),
        Cell::new("Iter"),
        Cell::new("Flips"),
        Cell::new("Temp0"),
        Cell::new("Accepted"),
        Cell::new("Init").fg(Color::Cyan),
        Cell::new("Final").fg(Color::Cyan),
        Cell::new("Change").add_attribute(Attribute::Bold),
    ]);

    for report in &result.rounds {
        let p = &report.params;
        let kind = p.kind();
        let (iter, flips, temp) = match kind {
            RoundKind::Anneal => (
                p.iterations.to_string(),
                format!("{}..{}", p.min_flips, p.max_flips),
                format!("{}", p.temp0),
            ),
            _ => ("-".into(), "-".into(), "-".into()),
        };

        let mut row = vec![
            Cell::new(report.round),
            Cell::new(kind),
            Cell::new(iter).set_alignment(CellAlignment::Right),
            Cell::new(flips).set_alignment(CellAlignment::Right),
            Cell::new(temp).set_alignment(CellAlignment::Right),
        ];

        match &report.stats {
            Some(s) => {
                row.push(Cell::new(s.accepted).set_alignment(CellAlignment::Right));
                row.push(Cell::new(s.init).set_alignment(CellAlignment::Right));
                row.push(Cell::new(s.final_score).set_alignment(CellAlignment::Right));
                row.push(change_cell(s.init, s.final_score, p.optimize));
            }
            None => row.extend((0..4).map(|_| Cell::new("-"))),
        }
        table.add_row(row);
    }

    // Rounds may override the direction; the last round decides the total's color.
    let overall = result
        .rounds
        .last()
        .map(|r| r.params.optimize)
        .unwrap_or_default();

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(result.init).set_alignment(CellAlignment::Right),
        Cell::new(result.final_score).set_alignment(CellAlignment::Right),
        change_cell(result.init, result.final_score, overall),
    ]);

    eprintln!("\n{}", table);
}

pub fn print_score_summary(
    karyotype: &Karyotype,
    order: &[usize],
    selection: &Selection,
    link_count: usize,
    score: Score,
) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Slot"),
        Cell::new("Ideogram").add_attribute(Attribute::Bold),
        Cell::new("Start"),
        Cell::new("End"),
        Cell::new("Static"),
    ]);

    for (slot, &idx) in order.iter().enumerate() {
        let ideo = karyotype.get(idx);
        table.add_row(vec![
            Cell::new(slot),
            Cell::new(&ideo.name),
            Cell::new(ideo.start).set_alignment(CellAlignment::Right),
            Cell::new(ideo.end).set_alignment(CellAlignment::Right),
            Cell::new(if selection.is_static(idx) { "yes" } else { "" }),
        ]);
    }

    eprintln!("\n{}", table);
    eprintln!("Links scored: {} | Crossings: {}", link_count, score);
}
