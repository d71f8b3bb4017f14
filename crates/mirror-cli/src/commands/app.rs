//! The `mirror app` command: an interactive screen loop.
//!
//! Each screen renders itself, reads one choice and turns it into a
//! [`NavAction`]. Returning `None` quits the application.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use mirror_core::chakra::{chakra_map, resolve_result};
use mirror_core::data::{DataSource, DataState, ReferenceData};
use mirror_core::model::ArchetypeResult;
use mirror_core::navigation::{NavAction, Navigator, Screen};
use mirror_core::report::ReportPayload;
use mirror_core::summary::personalized_summary;
use mirror_providers::config::{load_config_from, summary_provider};
use mirror_providers::MirrorConfig;
use mirror_report::exporters_for;

use crate::commands::quiz::run_interactive;
use crate::display::{
    archetype_detail, chakra_table, library_table, pairing_text, results_text, APP_TITLE, TAGLINE,
};
use crate::prompt::Prompter;

const UNAVAILABLE_MESSAGE: &str =
    "Archetype data is unavailable. Check the data directory and try again.";

pub async fn execute(data: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = DataSource::from_option(data.or_else(|| config.data_dir.clone()));
    let state = DataState::load(&source).await;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    run(&state, &config, &mut prompter).await
}

pub(crate) async fn run<R: BufRead, W: Write>(
    state: &DataState,
    config: &MirrorConfig,
    p: &mut Prompter<R, W>,
) -> Result<()> {
    let Some(data) = state.data() else {
        writeln!(p.out(), "{UNAVAILABLE_MESSAGE}")?;
        return Ok(());
    };

    let mut nav = Navigator::new();
    loop {
        let action = match nav.screen().clone() {
            Screen::Home => home(p)?,
            Screen::Test => test(data, config, p)?,
            Screen::Results { result } => results(data, config, &result, p).await?,
            Screen::Library => library(data, p)?,
            Screen::ArchetypeDetail { archetype_id } => detail(data, &archetype_id, p)?,
            Screen::Pairing { initial_pair } => pairing(data, initial_pair, p)?,
            Screen::ChakraMap { result } => chakra(data, &result, p)?,
        };

        let Some(action) = action else {
            break;
        };
        if let Err(e) = nav.dispatch(action) {
            writeln!(p.out(), "{e}")?;
        }
    }

    writeln!(p.out(), "Goodbye.")?;
    Ok(())
}

/// Map the keys every screen understands.
fn common(choice: &str) -> Option<Option<NavAction>> {
    match choice {
        "q" => Some(None),
        "h" => Some(Some(NavAction::Header)),
        "b" => Some(Some(NavAction::Back)),
        _ => None,
    }
}

fn home<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Option<NavAction>> {
    let out = p.out();
    writeln!(out, "\n{APP_TITLE}\n{TAGLINE}\n")?;
    writeln!(out, "  1) Start the Archetype Test")?;
    writeln!(out, "  2) Archetype Library")?;
    writeln!(out, "  3) Explore Pairings")?;
    writeln!(out, "  q) Quit")?;

    let Some(choice) = p.choose(">", &["1", "2", "3", "h", "q"])? else {
        return Ok(None);
    };
    Ok(match choice.as_str() {
        "1" => Some(NavAction::StartTest),
        "2" => Some(NavAction::ShowLibrary),
        "3" => Some(NavAction::ShowPairing(None)),
        other => common(other).flatten(),
    })
}

fn test<R: BufRead, W: Write>(
    data: &ReferenceData,
    config: &MirrorConfig,
    p: &mut Prompter<R, W>,
) -> Result<Option<NavAction>> {
    let Some(outcome) = run_interactive(data.questions(), config.scoring.clone(), p)? else {
        return Ok(Some(NavAction::Back));
    };
    match resolve_result(&outcome.result, data) {
        Ok(resolved) => Ok(Some(NavAction::CompleteTest(resolved.result))),
        Err(e) => {
            writeln!(p.out(), "Could not resolve your result: {e}")?;
            Ok(Some(NavAction::Back))
        }
    }
}

async fn results<R: BufRead, W: Write>(
    data: &ReferenceData,
    config: &MirrorConfig,
    result: &ArchetypeResult,
    p: &mut Prompter<R, W>,
) -> Result<Option<NavAction>> {
    let resolved = resolve_result(result, data)?;
    let mut summary: Option<String> = None;

    loop {
        let out = p.out();
        writeln!(out)?;
        write!(out, "{}", results_text(&resolved))?;
        writeln!(out, "\nNext Steps")?;
        writeln!(out, "  1) See Chakra Map")?;
        writeln!(out, "  2) Explore Pairing")?;
        writeln!(out, "  3) Get AI-Powered Insight")?;
        writeln!(out, "  4) Export Report")?;
        writeln!(out, "  5) Retake the Test")?;
        writeln!(out, "  h) Home  q) Quit")?;

        let Some(choice) = p.choose(">", &["1", "2", "3", "4", "5", "h", "b", "q"])? else {
            return Ok(None);
        };
        match choice.as_str() {
            "1" => return Ok(Some(NavAction::ShowChakraMap)),
            "2" => {
                let pair = (
                    resolved.primary.id.clone(),
                    resolved.secondary.id.clone(),
                );
                return Ok(Some(NavAction::ShowPairing(Some(pair))));
            }
            "3" => {
                writeln!(p.out(), "Generating your personalized insight...")?;
                let provider = summary_provider(config);
                let text = personalized_summary(
                    provider.as_deref(),
                    &config.default_model,
                    resolved.primary,
                    resolved.secondary,
                )
                .await;
                writeln!(p.out(), "\nYour Personalized Insight\n\n{text}")?;
                summary = Some(text);
            }
            "4" => export(data, config, result, summary.as_deref(), p)?,
            "5" => return Ok(Some(NavAction::Retake)),
            other => return Ok(common(other).flatten()),
        }
    }
}

fn export<R: BufRead, W: Write>(
    data: &ReferenceData,
    config: &MirrorConfig,
    result: &ArchetypeResult,
    summary: Option<&str>,
    p: &mut Prompter<R, W>,
) -> Result<()> {
    let Some(formats) = p.ask("Formats (html, markdown, json, all) [html]:")? else {
        return Ok(());
    };
    let formats = if formats.is_empty() { "html".to_string() } else { formats };
    let exporters = match exporters_for(&formats) {
        Ok(exporters) => exporters,
        Err(e) => {
            writeln!(p.out(), "{e}")?;
            return Ok(());
        }
    };
    let name = p.ask("Your name (optional):")?.filter(|n| !n.is_empty());

    let mut payload = ReportPayload::build(result, data, None, name)?;
    if let Some(text) = summary {
        payload = payload.with_summary(text);
    }
    for exporter in &exporters {
        match exporter.export(&payload, &config.output_dir) {
            Ok(path) => writeln!(p.out(), "{} report: {}", exporter.name(), path.display())?,
            Err(e) => writeln!(p.out(), "Export failed: {e:#}")?,
        }
    }
    Ok(())
}

fn library<R: BufRead, W: Write>(
    data: &ReferenceData,
    p: &mut Prompter<R, W>,
) -> Result<Option<NavAction>> {
    loop {
        writeln!(p.out(), "\nArchetype Library\n{}", library_table(data.archetypes()))?;
        let Some(choice) = p.ask("Number or id to open, b) Back, q) Quit:")? else {
            return Ok(None);
        };
        let choice = choice.to_lowercase();
        if let Some(action) = common(&choice) {
            return Ok(action);
        }

        let selected = match choice.parse::<usize>() {
            Ok(n) if n >= 1 => data.archetypes().get(n - 1),
            _ => data.archetype(&choice),
        };
        match selected {
            Some(archetype) => return Ok(Some(NavAction::SelectArchetype(archetype.id.clone()))),
            None => writeln!(p.out(), "No archetype matches '{choice}'.")?,
        }
    }
}

fn detail<R: BufRead, W: Write>(
    data: &ReferenceData,
    archetype_id: &str,
    p: &mut Prompter<R, W>,
) -> Result<Option<NavAction>> {
    match data.archetype(archetype_id) {
        Some(archetype) => write!(p.out(), "\n{}", archetype_detail(archetype))?,
        None => writeln!(p.out(), "\nUnknown archetype '{archetype_id}'.")?,
    }
    let Some(choice) = p.choose("b) Back to library, h) Home, q) Quit:", &["b", "h", "q"])? else {
        return Ok(None);
    };
    Ok(common(&choice).flatten())
}

fn pairing<R: BufRead, W: Write>(
    data: &ReferenceData,
    initial_pair: Option<(String, String)>,
    p: &mut Prompter<R, W>,
) -> Result<Option<NavAction>> {
    let archetypes = data.archetypes();
    let (mut a, mut b) = initial_pair.unwrap_or_else(|| {
        let first = archetypes.first().map(|a| a.id.clone()).unwrap_or_default();
        let second = archetypes.get(1).map(|a| a.id.clone()).unwrap_or_default();
        (first, second)
    });

    loop {
        match (data.archetype(&a), data.archetype(&b)) {
            (Some(mine), Some(theirs)) => write!(p.out(), "\n{}", pairing_text(data, mine, theirs))?,
            _ => writeln!(p.out(), "\nUnknown archetype pair '{a}' + '{b}'.")?,
        }

        let Some(choice) = p.ask("Enter two archetype ids (e.g. 'rebel pleaser'), b) Back, q) Quit:")?
        else {
            return Ok(None);
        };
        let choice = choice.to_lowercase();
        if let Some(action) = common(&choice) {
            return Ok(action);
        }

        let ids: Vec<&str> = choice.split_whitespace().collect();
        match ids.as_slice() {
            [x, y] if data.contains_archetype(x) && data.contains_archetype(y) => {
                a = x.to_string();
                b = y.to_string();
            }
            _ => writeln!(p.out(), "Please enter two known archetype ids.")?,
        }
    }
}

fn chakra<R: BufRead, W: Write>(
    data: &ReferenceData,
    result: &ArchetypeResult,
    p: &mut Prompter<R, W>,
) -> Result<Option<NavAction>> {
    writeln!(
        p.out(),
        "\nYour Chakra Map\n{}",
        chakra_table(&chakra_map(data, result), data)
    )?;
    let Some(choice) = p.choose("b) Back to results, h) Home, q) Quit:", &["b", "h", "q"])? else {
        return Ok(None);
    };
    Ok(common(&choice).flatten())
}
