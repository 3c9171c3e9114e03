//! Interactive dashboard: one search-then-select workflow per panel and the
//! navigation between them.

use std::{collections::HashMap, fmt};

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use meteo_core::{
    DetailView, DomainResult, FeatureFetcher, FeatureKind, LocationCandidate, LocationResolver,
    PanelKind, Workflow, config::ClimateConfig,
};
use tracing::debug;

use crate::render;

pub struct App<C> {
    client: C,
    climate: ClimateConfig,
    active: PanelKind,
    geocoding: Workflow<LocationCandidate>,
    features: HashMap<FeatureKind, Workflow<DomainResult>>,
}

impl<C> App<C>
where
    C: LocationResolver + FeatureFetcher,
{
    pub fn new(client: C, climate: ClimateConfig, active: PanelKind) -> Self {
        Self {
            client,
            climate,
            active,
            geocoding: Workflow::new(),
            features: FeatureKind::all().iter().map(|k| (*k, Workflow::new())).collect(),
        }
    }

    pub fn active(&self) -> PanelKind {
        self.active
    }

    /// Panels keep their own search state while inactive.
    pub fn switch_panel(&mut self, panel: PanelKind) {
        debug!(from = %self.active.as_str(), to = %panel.as_str(), "Switching panel");
        self.active = panel;
    }

    fn feature(&mut self, kind: FeatureKind) -> &mut Workflow<DomainResult> {
        self.features.entry(kind).or_default()
    }

    pub async fn search(&mut self, query: &str) -> bool {
        match self.active {
            PanelKind::Geocoding => self.geocoding.submit(&self.client, query).await,
            PanelKind::Feature(kind) => {
                let workflow = self.features.entry(kind).or_default();
                workflow.submit(&self.client, query).await
            }
        }
    }

    pub async fn select(&mut self, candidate: LocationCandidate) -> bool {
        match self.active {
            PanelKind::Geocoding => self.geocoding.select_candidate(candidate),
            PanelKind::Feature(kind) => {
                let workflow = self.features.entry(kind).or_default();
                workflow.select(&self.client, kind, candidate).await
            }
        }
    }

    pub fn back_to_results(&mut self) -> bool {
        match self.active {
            PanelKind::Geocoding => self.geocoding.back(),
            PanelKind::Feature(kind) => self.feature(kind).back(),
        }
    }

    pub fn reset(&mut self) {
        match self.active {
            PanelKind::Geocoding => self.geocoding.reset(),
            PanelKind::Feature(kind) => self.feature(kind).reset(),
        }
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        match self.active {
            PanelKind::Geocoding => self.geocoding.candidates(),
            PanelKind::Feature(kind) => self
                .features
                .get(&kind)
                .map(Workflow::candidates)
                .unwrap_or_default(),
        }
    }

    pub fn selected(&self) -> Option<&LocationCandidate> {
        match self.active {
            PanelKind::Geocoding => self.geocoding.selected(),
            PanelKind::Feature(kind) => self.features.get(&kind).and_then(|w| w.selected()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self.active {
            PanelKind::Geocoding => self.geocoding.error(),
            PanelKind::Feature(kind) => self.features.get(&kind).and_then(|w| w.error()),
        }
    }

    /// Detail of the active panel, once its fetch has finished.
    pub fn detail_view(&self) -> Option<DetailView> {
        match self.active {
            PanelKind::Geocoding => self
                .geocoding
                .detail()
                .and_then(|d| d.loaded())
                .map(DetailView::for_location),
            PanelKind::Feature(kind) => {
                let workflow = self.features.get(&kind)?;
                let selected = workflow.selected()?;
                let detail = workflow.detail()?;
                Some(DetailView::for_feature(kind, selected, detail, &self.climate))
            }
        }
    }

    fn actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::Search];
        if !self.candidates().is_empty() {
            actions.push(Action::Pick);
        }
        if self.detail_view().is_some() {
            actions.push(Action::BackToResults);
        }
        if !self.candidates().is_empty() {
            actions.push(Action::ReturnToSearch);
        }
        if self.selected().is_some() {
            actions.push(Action::Locate);
        }
        actions.extend([Action::SwitchPanel, Action::Quit]);
        actions
    }

    /// Prompt loop; Esc or Ctrl-C at any prompt quits.
    pub async fn run(mut self) -> Result<()> {
        loop {
            println!("\n## {}\n", self.active.title());
            if let Some(view) = self.detail_view() {
                println!("{}", render::detail(&view, false));
            } else if !self.candidates().is_empty() {
                println!("{}", render::candidates(self.candidates()));
            } else if let Some(error) = self.error() {
                println!("{error}");
            }
            println!();

            let Some(action) = prompt(Select::new("What next?", self.actions()).prompt())? else {
                break;
            };

            match action {
                Action::Search => {
                    let Some(query) = prompt(Text::new("Location:").prompt())? else {
                        break;
                    };
                    let searched = self.search(&query).await;
                    if searched && self.candidates().is_empty() && self.error().is_none() {
                        println!("No locations found for '{}'.", query.trim());
                    }
                }
                Action::Pick => {
                    let options = self.candidates().to_vec();
                    let Some(candidate) = prompt(Select::new("Pick a location:", options).prompt())?
                    else {
                        break;
                    };
                    self.select(candidate).await;
                }
                Action::BackToResults => {
                    self.back_to_results();
                }
                Action::ReturnToSearch => self.reset(),
                Action::Locate => {
                    if let Some(view) = self.detail_view() {
                        println!("{}: {}", view.marker.label, view.marker.osm_url());
                    }
                }
                Action::SwitchPanel => {
                    let panels = PanelKind::all();
                    let cursor = panels.iter().position(|p| *p == self.active).unwrap_or(0);
                    let Some(panel) = prompt(
                        Select::new("Panel:", panels)
                            .with_starting_cursor(cursor)
                            .prompt(),
                    )?
                    else {
                        break;
                    };
                    self.switch_panel(panel);
                }
                Action::Quit => break,
            }
        }

        Ok(())
    }
}

/// `None` when the user backed out of the prompt.
pub fn prompt<T>(answer: Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Pick,
    BackToResults,
    ReturnToSearch,
    Locate,
    SwitchPanel,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search",
            Action::Pick => "Pick a location",
            Action::BackToResults => "Back to results",
            Action::ReturnToSearch => "Return to search",
            Action::Locate => "Locate in map",
            Action::SwitchPanel => "Switch panel",
            Action::Quit => "Quit",
        })
    }
}
