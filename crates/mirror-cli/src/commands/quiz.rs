//! The `mirror quiz` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use mirror_core::chakra::resolve_result;
use mirror_core::data::ReferenceData;
use mirror_core::model::TestQuestion;
use mirror_core::quiz::{answer_all, QuizOutcome, QuizProgress, QuizSession};
use mirror_core::report::ReportPayload;
use mirror_core::scoring::ScoringConfig;
use mirror_core::summary::personalized_summary;
use mirror_providers::config::{load_config_from, summary_provider};
use mirror_report::exporters_for;

use crate::commands::load_reference;
use crate::display::{results_text, score_table};
use crate::prompt::Prompter;

/// Walk the questions on the console. `None` if the user abandons the quiz
/// or input ends first.
pub(crate) fn run_interactive<R: BufRead, W: Write>(
    questions: &[TestQuestion],
    scoring: ScoringConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<QuizOutcome>> {
    let mut session = QuizSession::new(questions, scoring)?;

    while let Some(question) = session.current() {
        let out = prompter.out();
        writeln!(
            out,
            "\nQuestion {} of {} ({:.0}%)",
            session.position(),
            session.total(),
            session.progress_percent()
        )?;
        writeln!(out, "{}", question.question)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, option.label)?;
        }

        let prompt = format!("Choose 1-{} (b to abandon):", question.options.len());
        let Some(answer) = prompter.ask(&prompt)? else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("b") {
            return Ok(None);
        }

        let index = match answer.parse::<usize>() {
            Ok(n) if (1..=question.options.len()).contains(&n) => n - 1,
            _ => {
                writeln!(
                    prompter.out(),
                    "Please enter a number between 1 and {}.",
                    question.options.len()
                )?;
                continue;
            }
        };

        if let QuizProgress::Complete(outcome) = session.answer_index(index)? {
            return Ok(Some(outcome));
        }
    }

    Ok(None)
}

fn score_answer_sheet(
    data: &ReferenceData,
    answers: &str,
    scoring: ScoringConfig,
) -> Result<QuizOutcome> {
    let ids: Vec<&str> = answers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    Ok(answer_all(data.questions(), &ids, scoring)?)
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    answers: Option<String>,
    data_dir: Option<PathBuf>,
    summary: bool,
    format: Option<String>,
    output: Option<PathBuf>,
    partner: Option<String>,
    name: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data = load_reference(data_dir.or_else(|| config.data_dir.clone())).await?;

    // Fail on a bad format list before asking any questions.
    let exporters = format.as_deref().map(exporters_for).transpose()?;

    let outcome = match &answers {
        Some(sheet) => score_answer_sheet(&data, sheet, config.scoring.clone())?,
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
            match run_interactive(data.questions(), config.scoring.clone(), &mut prompter)? {
                Some(outcome) => outcome,
                None => {
                    println!("Quiz abandoned.");
                    return Ok(());
                }
            }
        }
    };

    let resolved = resolve_result(&outcome.result, &data)?;
    tracing::info!(
        primary = %resolved.result.primary_mask_id,
        secondary = %resolved.result.secondary_mask_id,
        "quiz scored"
    );

    println!();
    print!("{}", results_text(&resolved));
    if !outcome.score.is_empty() {
        println!("\n{}", score_table(&outcome.score, &data));
    }

    let summary_text = if summary {
        let provider = summary_provider(&config);
        let text = personalized_summary(
            provider.as_deref(),
            &config.default_model,
            resolved.primary,
            resolved.secondary,
        )
        .await;
        println!("\nYour Personalized Insight\n\n{text}");
        Some(text)
    } else {
        None
    };

    if let Some(exporters) = exporters {
        let mut payload = ReportPayload::build(&outcome.result, &data, partner.as_deref(), name)?;
        if let Some(text) = summary_text {
            payload = payload.with_summary(text);
        }

        let dir = output.unwrap_or_else(|| config.output_dir.clone());
        println!();
        for exporter in &exporters {
            let path = exporter.export(&payload, &dir)?;
            println!("{} report: {}", exporter.name(), path.display());
        }
    }

    Ok(())
}
