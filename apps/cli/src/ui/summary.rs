use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use devstrap::domain::entities::health::HealthResult;
use devstrap::domain::entities::outcome::{InstallReport, Outcome};

fn table(header: [&str; 3]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// One row per intent: successes first, then failures, each in run order.
pub fn outcomes_table(report: &InstallReport) -> Table {
    let mut table = table(["Package", "Kind", "Result"]);

    for outcome in report.all() {
        let intent = outcome.intent();
        let result = match outcome {
            Outcome::Success(_) => Cell::new(outcome.label()).fg(Color::Green),
            Outcome::AlreadySatisfied(_) => Cell::new(outcome.label()).fg(Color::DarkGrey),
            Outcome::Failure { exit_code, .. } => {
                Cell::new(format!("{} (exit {})", outcome.label(), exit_code)).fg(Color::Red)
            }
        };
        table.add_row(vec![
            Cell::new(&intent.name),
            Cell::new(intent.kind),
            result,
        ]);
    }

    table
}

pub fn health_table(results: &[HealthResult]) -> Table {
    let mut table = table(["Tool", "Status", "Detail"]);

    for result in results {
        let status = if result.ok {
            Cell::new("healthy").fg(Color::Green)
        } else {
            Cell::new("unhealthy").fg(Color::Red)
        };
        table.add_row(vec![Cell::new(&result.tool), status, Cell::new(&result.detail)]);
    }

    table
}
