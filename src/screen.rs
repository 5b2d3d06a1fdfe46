//! The UI task: owns both screens and applies every event to them.

use std::{ops::ControlFlow, rc::Rc, str::FromStr};

use anyhow::Result;
use geomark_core::{
    alert_gate::AlertGate,
    entities::{Coordinate, LocationEvent},
    gateways::geocode::GeocodingResult,
    presenter::LocationPresenter,
    search::SearchController,
    tracking::TrackingController,
};
use geomark_gateways::track::read_track_file;
use thiserror::Error;
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use crate::{
    config::Config,
    dispatch::BlockingDispatcher,
    gateways::GeocodingGw,
    location::TrackReplay,
    terminal::{TerminalAlerts, TerminalInput, TerminalLabels, TerminalMap},
};

pub enum UiEvent {
    Location(LocationEvent),
    ReverseGeocoded {
        pos: Coordinate,
        result: GeocodingResult,
    },
    ForwardGeocoded {
        query: String,
        result: GeocodingResult,
    },
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search button
    Search(String),
    /// Return key in the search field
    Submit(String),
    Mark,
    Dismiss,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown command '{0}' (try: search <address>, submit <address>, mark, ok, quit)")]
pub struct UnknownCommand(String);

impl FromStr for Command {
    type Err = UnknownCommand;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, arg) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let cmd = match name.to_lowercase().as_str() {
            "search" => Self::Search(arg.to_owned()),
            "submit" => Self::Submit(arg.to_owned()),
            "mark" => Self::Mark,
            "ok" | "dismiss" => Self::Dismiss,
            "quit" | "exit" => Self::Quit,
            _ => return Err(UnknownCommand(s.to_owned())),
        };
        Ok(cmd)
    }
}

pub struct Screens {
    tracking: TrackingController,
    search: SearchController,
    alerts: Rc<TerminalAlerts>,
}

impl Screens {
    pub fn new(
        tracking: TrackingController,
        search: SearchController,
        alerts: Rc<TerminalAlerts>,
    ) -> Self {
        Self {
            tracking,
            search,
            alerts,
        }
    }

    pub fn start(&mut self) {
        self.tracking.start();
    }

    pub fn handle(&mut self, event: UiEvent) -> ControlFlow<()> {
        match event {
            UiEvent::Location(event) => self.tracking.handle_event(event),
            UiEvent::ReverseGeocoded { pos, result } => {
                self.tracking.on_reverse_geocoded(pos, result);
            }
            UiEvent::ForwardGeocoded { query, result } => {
                // Failures have already been shown as alert.
                let _ = self.search.on_forward_geocoded(&query, result);
            }
            UiEvent::Command(cmd) => return self.handle_command(cmd),
        }
        ControlFlow::Continue(())
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Search(query) => {
                let _ = self.search.search(&query);
            }
            Command::Submit(query) => {
                let _ = self.search.submit(&query);
            }
            Command::Mark => match self.tracking.mark_current_location() {
                Ok(mark) => println!("Marked Geocache Location: {}", mark.coordinates),
                Err(err) => log::debug!("Nothing marked: {err}"),
            },
            Command::Dismiss => {
                if self.alerts.dismiss().is_none() {
                    log::debug!("No alert to dismiss");
                }
            }
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
}

pub async fn run(cfg: Config, geocoder: GeocodingGw) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    let track = match &cfg.location.track_file {
        Some(path) => read_track_file(path)?,
        None => {
            log::warn!("No track file configured: no location updates will arrive");
            vec![]
        }
    };
    let location = Rc::new(TrackReplay::new(
        track,
        cfg.location.replay_interval,
        cfg.location.permission_answer,
        tx.clone(),
    ));
    let dispatcher = Rc::new(BlockingDispatcher::new(geocoder, tx.clone()));
    let alerts = Rc::new(TerminalAlerts::default());

    let presenter = LocationPresenter::new(
        Rc::new(TerminalLabels::default()),
        alerts.clone(),
        AlertGate::new(),
    );
    let tracking = TrackingController::new(location, dispatcher.clone(), presenter)
        .with_settings(cfg.location.settings);
    let search = SearchController::new(
        dispatcher,
        Rc::new(TerminalMap::default()),
        Rc::new(TerminalInput),
        alerts.clone(),
    )
    .with_region_span(cfg.map.span);

    tokio::spawn(read_commands(tx));

    let mut screens = Screens::new(tracking, search, alerts);
    screens.start();
    event_loop(&mut screens, rx).await;
    Ok(())
}

async fn event_loop(screens: &mut Screens, mut events: UnboundedReceiver<UiEvent>) {
    while let Some(event) = events.recv().await {
        if screens.handle(event).is_break() {
            break;
        }
    }
}

async fn read_commands(events: UnboundedSender<UiEvent>) {
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let cmd = match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match line.parse() {
                Ok(cmd) => cmd,
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            },
            Ok(None) => Command::Quit,
            Err(err) => {
                log::warn!("Failed to read from stdin: {err}");
                Command::Quit
            }
        };
        let quit = cmd == Command::Quit;
        if events.send(UiEvent::Command(cmd)).is_err() || quit {
            return;
        }
    }
}
