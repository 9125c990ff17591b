use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use lineup::catalog::SquadSize;
use lineup::lineup::LineupBuilder;
use lineup::lineup_protocol::{Formation, PlayerRecord};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn print_formations(size: SquadSize, formations: &[Formation]) {
    println!("\n{}-a-side", size);
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Formation").add_attribute(Attribute::Bold),
        Cell::new("Players"),
        Cell::new("Roles"),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (i, formation) in formations.iter().enumerate() {
        let name = Cell::new(&formation.name).add_attribute(Attribute::Bold);
        // First entry is what a squad size change resets to
        let name = if i == 0 { name.fg(Color::Green) } else { name };
        table.add_row(vec![
            name,
            Cell::new(formation.len()),
            Cell::new(formation.roles().join(" ")),
        ]);
    }
    println!("{table}");
}

pub fn print_slots(lineup: &LineupBuilder) {
    let formation = lineup.formation();
    println!(
        "\nLineup: {} ({}-a-side{})",
        formation.name,
        lineup.squad_size(),
        if lineup.display().flip_vertically {
            ", flipped"
        } else {
            ""
        }
    );
    if !lineup.title().is_empty() {
        println!("{} {}", lineup.title(), lineup.subtitle());
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Role").add_attribute(Attribute::Bold),
        Cell::new("X %"),
        Cell::new("Y %"),
        Cell::new("Player"),
        Cell::new(""),
    ]);
    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, slot) in lineup.editor().slots().iter().enumerate() {
        let player = match &slot.player {
            Some(p) => Cell::new(p.display_name()).fg(Color::Green),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        let mut badges = Vec::new();
        if lineup.is_captain(i) {
            badges.push("C");
        }
        if lineup.is_man_of_the_match(i) {
            badges.push("★");
        }
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&slot.role).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", slot.x)),
            Cell::new(format!("{:.1}", slot.y)),
            player,
            Cell::new(badges.join(" ")).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn print_search_results(query: &str, players: &[PlayerRecord]) {
    println!("\nResults for {:?}: {}", query, players.len());
    if players.is_empty() {
        println!("No players found");
        return;
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Positions"),
        Cell::new("Club"),
        Cell::new("Nationality"),
        Cell::new("Rating").fg(Color::Cyan),
        Cell::new("Age"),
    ]);
    for i in [0, 5, 6] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, p) in players.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(p.display_name()).add_attribute(Attribute::Bold),
            Cell::new(p.positions.join(", ")),
            Cell::new(or_dash(p.club.as_deref())),
            Cell::new(or_dash(p.nationality.as_deref())),
            Cell::new(or_dash(p.rating)).fg(Color::Cyan),
            Cell::new(or_dash(p.age)),
        ]);
    }
    println!("{table}");
}
