//! Output formatting for CLI

use crate::import::IngestStats;
use crate::models::{CardDocument, LegacyEnvelope};
use crate::schema::CollectionOutcome;

use super::CliError;

/// Serialize a value as pretty JSON for `--json` output
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
}

/// Format an ingestion summary
pub fn format_ingest_stats(stats: &IngestStats) -> String {
    let mut output = String::new();

    output.push_str("Ingestion complete:\n");
    if let Some(outcome) = stats.collection {
        let label = match outcome {
            CollectionOutcome::Created => "created",
            CollectionOutcome::Recreated => "recreated",
            CollectionOutcome::Existing => "existing",
        };
        output.push_str(&format!("  Collection:       {}\n", label));
    }
    output.push_str(&format!("  Records read:     {}\n", stats.records_read));
    output.push_str(&format!("  Cards indexed:    {}\n", stats.cards_indexed));
    output.push_str(&format!("  Cards excluded:   {}\n", stats.cards_excluded));
    output.push_str(&format!("  Already present:  {}\n", stats.already_present));
    if stats.images_derived + stats.images_skipped + stats.images_failed > 0 {
        output.push_str(&format!(
            "  Images:           {} derived, {} skipped, {} failed\n",
            stats.images_derived, stats.images_skipped, stats.images_failed
        ));
    }
    output.push_str(&format!(
        "  Duration:         {} ({:.0} records/s)\n",
        stats.duration_string(),
        stats.throughput()
    ));

    if stats.errors_count > 0 {
        output.push_str(&format!("\nErrors ({}):\n", stats.errors_count));
        for error in stats.errors.iter().take(10) {
            output.push_str(&format!("  - {}\n", error));
        }
        if stats.errors_count > 10 {
            output.push_str(&format!("  ... and {} more\n", stats.errors_count - 10));
        }
    }

    output
}

/// One line per hit, preceded by the match count
pub fn format_envelope_compact(envelope: &LegacyEnvelope) -> String {
    let mut output = format!(
        "{} match(es), showing {}\n",
        envelope.total(),
        envelope.hits.hits.len()
    );
    for hit in &envelope.hits.hits {
        let source = &hit.source;
        output.push_str(&format!(
            "  {:>10}  {:<10} {} [{}]\n",
            source.cardid,
            source.id,
            source.title,
            source.card_type.join(", ")
        ));
    }
    output
}

/// Full card listing
pub fn format_document(document: &CardDocument) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", document.puretexttitle, document.id));
    output.push_str(&format!("  Type:     {}\n", document.card_type.join(", ")));
    output.push_str(&format!("  Deck:     {}\n", document.deck.join(", ")));
    if !document.clan.is_empty() {
        output.push_str(&format!("  Clan:     {}\n", document.clan.join(", ")));
    }
    if !document.keywords.is_empty() {
        output.push_str(&format!("  Keywords: {}\n", document.keywords.join(" • ")));
    }
    output.push_str(&format!("  Legality: {}\n", document.legality.join(", ")));

    let stats = [
        ("Force", &document.force),
        ("Chi", &document.chi),
        ("Honor req", &document.honor),
        ("Personal honor", &document.ph),
        ("Cost", &document.cost),
        ("Gold", &document.goldproduction),
        ("Starting honor", &document.startinghonor),
        ("Province str", &document.provincestrength),
    ];
    for (label, value) in stats {
        if let Some(value) = value {
            output.push_str(&format!("  {}: {}\n", label, value));
        }
    }

    if !document.text.is_empty() {
        output.push_str(&format!("\n  {}\n", document.text));
    }

    output.push_str("\n  Printings:\n");
    for printing in &document.printing {
        let primary = if printing.printingid == document.printingprimary {
            " *"
        } else {
            ""
        };
        output.push_str(&format!(
            "    {}. {} #{} ({}){}\n",
            printing.printingid, printing.set, printing.number, printing.rarity, primary
        ));
    }
    output
}
