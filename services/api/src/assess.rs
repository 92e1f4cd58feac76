use clap::Args;
use readiness_core::barriers::{BarrierCatalog, SuggestionEngine, SuggestionRules};
use readiness_core::config::AppConfig;
use readiness_core::error::AppError;
use readiness_core::readiness::{Dimension, ReadinessEngine};
use readiness_core::sessions::{AssessmentPreview, ScoreInput};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file with a tagged score payload: {"model": "...", "scores": {...}}
    #[arg(long)]
    pub(crate) scores: PathBuf,
    /// JSON barrier bank to use instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// JSON barrier bank to use instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Only list barriers linked to this dimension key
    #[arg(long, value_parser = parse_dimension)]
    pub(crate) dimension: Option<Dimension>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        scores,
        catalog,
        json,
    } = args;

    let config = AppConfig::load()?;
    let catalog = match catalog {
        Some(path) => BarrierCatalog::from_path(path)?,
        None => config.scoring.catalog()?,
    };
    let engine = config.scoring.engine();

    let file = File::open(scores)?;
    let preview = assess_reader(BufReader::new(file), &engine, &catalog)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        print!("{}", render_preview(&preview));
    }
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = match args.catalog {
        Some(path) => BarrierCatalog::from_path(path)?,
        None => config.scoring.catalog()?,
    };
    print!("{}", render_catalog(&catalog, args.dimension));
    Ok(())
}

pub(crate) fn assess_reader<R: Read>(
    reader: R,
    engine: &ReadinessEngine,
    catalog: &BarrierCatalog,
) -> Result<AssessmentPreview, AppError> {
    let suggestions = SuggestionEngine::verified(SuggestionRules::standard(), catalog)?;
    let input: ScoreInput = serde_json::from_reader(reader)?;
    let scores = input.into_scores()?;
    let assessment = engine.assess(&scores);
    let suggested = suggestions.suggest_for_assessment(&assessment, catalog);

    Ok(AssessmentPreview {
        percentage: assessment.percentage(),
        summary: assessment.summary(),
        assessment,
        suggestions: suggested,
    })
}

pub(crate) fn render_preview(preview: &AssessmentPreview) -> String {
    let assessment = &preview.assessment;
    let mut out = format!("Readiness assessment ({})\n", assessment.model.label());

    out.push_str(&format!(
        "- {} | {}% of maximum | labour market distance: {}\n",
        preview.summary,
        preview.percentage,
        assessment.readiness_category.labour_market_distance()
    ));
    out.push_str("Dimension averages:\n");
    for (dimension, average) in assessment.dimension_averages.iter() {
        out.push_str(&format!("  - {}: {}\n", dimension.label(), average));
    }

    if preview.suggestions.is_empty() {
        out.push_str("No barriers suggested.\n");
    } else {
        out.push_str("Suggested barriers:\n");
        for suggestion in &preview.suggestions {
            out.push_str(&format!(
                "  - [{}] {} ({}, {} severity)\n",
                suggestion.dimension,
                suggestion.label,
                suggestion.code,
                suggestion.severity.label()
            ));
        }
    }
    out
}

pub(crate) fn render_catalog(catalog: &BarrierCatalog, dimension: Option<Dimension>) -> String {
    let mut out = format!("Barrier bank ({} entries)\n", catalog.len());

    for entry in catalog.entries() {
        if dimension.is_some() && entry.dimension != dimension {
            continue;
        }
        let linked = entry
            .dimension
            .map_or("cross-cutting", |dimension| dimension.key());
        out.push_str(&format!(
            "  - {:<28} {:<14} {:<7} {}\n",
            entry.code,
            entry.category,
            entry.default_severity.label(),
            linked
        ));
    }
    out
}

/// Accepts a dimension key such as `financial`.
pub(crate) fn parse_dimension(value: &str) -> Result<Dimension, String> {
    Dimension::from_key(value).ok_or_else(|| {
        let keys: Vec<_> = Dimension::ordered()
            .into_iter()
            .map(Dimension::key)
            .collect();
        format!("unknown dimension '{value}', expected one of: {}", keys.join(", "))
    })
}
