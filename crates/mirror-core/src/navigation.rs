//! Screen navigation state machine.
//!
//! The current screen is an explicit tagged union and every user action is
//! applied through [`Screen::transition`], so the flow can be exercised
//! without any rendering.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::model::ArchetypeResult;

/// The screen currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Home,
    Test,
    Results {
        result: ArchetypeResult,
    },
    Library,
    ArchetypeDetail {
        archetype_id: String,
    },
    Pairing {
        initial_pair: Option<(String, String)>,
    },
    ChakraMap {
        result: ArchetypeResult,
    },
}

/// A user action that may change the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    StartTest,
    CompleteTest(ArchetypeResult),
    Retake,
    ShowLibrary,
    SelectArchetype(String),
    ShowPairing(Option<(String, String)>),
    ShowChakraMap,
    /// Generic "back" affordance.
    Back,
    /// Clicking the application header.
    Header,
}

impl NavAction {
    fn name(&self) -> &'static str {
        match self {
            NavAction::StartTest => "start the test",
            NavAction::CompleteTest(_) => "complete the test",
            NavAction::Retake => "retake the test",
            NavAction::ShowLibrary => "open the library",
            NavAction::SelectArchetype(_) => "select an archetype",
            NavAction::ShowPairing(_) => "open pairings",
            NavAction::ShowChakraMap => "open the chakra map",
            NavAction::Back => "go back",
            NavAction::Header => "go home",
        }
    }
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Test => "test",
            Screen::Results { .. } => "results",
            Screen::Library => "library",
            Screen::ArchetypeDetail { .. } => "archetype detail",
            Screen::Pairing { .. } => "pairing",
            Screen::ChakraMap { .. } => "chakra map",
        }
    }

    /// Apply an action, returning the next screen.
    pub fn transition(self, action: NavAction) -> Result<Screen, NavigationError> {
        use NavAction as A;

        let next = match (self, action) {
            (_, A::Header) => Screen::Home,

            (Screen::Home, A::StartTest) => Screen::Test,
            (Screen::Home, A::ShowLibrary) => Screen::Library,
            (Screen::Home, A::ShowPairing(initial_pair)) => Screen::Pairing { initial_pair },

            (Screen::Test, A::CompleteTest(result)) => Screen::Results { result },

            (Screen::Results { .. }, A::ShowPairing(initial_pair)) => {
                Screen::Pairing { initial_pair }
            }
            (Screen::Results { result }, A::ShowChakraMap) => Screen::ChakraMap { result },
            (Screen::Results { .. }, A::Retake) => Screen::Test,

            (Screen::Library, A::SelectArchetype(archetype_id)) => {
                Screen::ArchetypeDetail { archetype_id }
            }

            (Screen::ArchetypeDetail { .. }, A::Back) => Screen::Library,
            (Screen::ChakraMap { result }, A::Back) => Screen::Results { result },
            (_, A::Back) => Screen::Home,

            (from, action) => {
                return Err(NavigationError::InvalidTransition {
                    from: from.name(),
                    action: action.name(),
                })
            }
        };
        Ok(next)
    }

    /// The result carried by this screen, if any.
    pub fn result(&self) -> Option<&ArchetypeResult> {
        match self {
            Screen::Results { result } | Screen::ChakraMap { result } => Some(result),
            _ => None,
        }
    }
}

/// Holds the current screen for one session.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    screen: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Apply an action. On error the current screen is left unchanged.
    pub fn dispatch(&mut self, action: NavAction) -> Result<&Screen, NavigationError> {
        let next = self.screen.clone().transition(action)?;
        tracing::debug!(from = self.screen.name(), to = next.name(), "navigate");
        self.screen = next;
        Ok(&self.screen)
    }
}
