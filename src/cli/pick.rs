//! Pick command handler
//!
//! Drives a `LocationPicker` from stdin. Plain lines are typed into the
//! search field; lines starting with `:` are commands. Committed locations
//! go to stdout as JSON, everything else to stderr.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::get_geocoder;
use crate::picker::{
    LocationPicker, MapAdapter, MapCommand, OnLocationChange, PickerHandle, PickerOptions,
    PickerView, ResolvedLocation,
};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Pick command arguments
#[derive(Args)]
pub struct PickArgs {
    /// Address to show before anything is selected
    #[arg(long)]
    pub address: Option<String>,

    /// Debounce delay in milliseconds (overrides config)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Geocoder base URL (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// One line of input
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Type(String),
    Pick(usize),
    Click(Coordinates),
    Drag(Coordinates),
    Edit(String),
    Away,
    Focus,
    Reset,
    Wait(u64),
    Help,
    Quit,
}

const HELP: &str = "\
Type an address to search, or:
  :pick N          choose suggestion N
  :click LAT LNG   click the map
  :drag LAT LNG    drop the marker
  :edit TEXT       edit the address by hand
  :away            click outside the suggestions
  :focus           focus the search field
  :reset           clear everything
  :wait MS         pause before reading the next line
  :quit";

fn parse_line(line: &str) -> std::result::Result<Line, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Line::Type(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    let position = |rest: &[&str]| match rest {
        [lat, lng] => Coordinates::parse(lat, lng).map_err(|e| e.to_string()),
        _ => Err(format!(":{} expects LAT LNG", name)),
    };

    match name {
        "pick" | "p" => match rest.as_slice() {
            [n] => n
                .parse()
                .map(Line::Pick)
                .map_err(|_| format!("Invalid suggestion number: {}", n)),
            _ => Err(":pick expects a suggestion number".to_string()),
        },
        "click" | "c" => position(rest.as_slice()).map(Line::Click),
        "drag" | "d" => position(rest.as_slice()).map(Line::Drag),
        "edit" => Ok(Line::Edit(rest.join(" "))),
        "away" => Ok(Line::Away),
        "focus" => Ok(Line::Focus),
        "reset" => Ok(Line::Reset),
        "wait" | "w" => match rest.as_slice() {
            [ms] => ms
                .parse()
                .map(Line::Wait)
                .map_err(|_| format!("Invalid wait: {}", ms)),
            _ => Err(":wait expects milliseconds".to_string()),
        },
        "help" | "h" | "?" => Ok(Line::Help),
        "quit" | "q" => Ok(Line::Quit),
        _ => Err(format!("Unknown command :{} (try :help)", name)),
    }
}

/// Map that prints each command to stderr
struct TerminalMap;

impl TerminalMap {
    fn show(&self, command: MapCommand) {
        match serde_json::to_string(&command) {
            Ok(json) => eprintln!("[map] {}", json),
            Err(e) => warn!(error = %e, "could not render map command"),
        }
    }
}

impl MapAdapter for TerminalMap {
    fn place_marker(&mut self, position: Coordinates) {
        self.show(MapCommand::PlaceMarker { position });
    }

    fn clear_marker(&mut self) {
        self.show(MapCommand::ClearMarker);
    }

    fn center(&mut self, position: Coordinates, zoom: u8) {
        self.show(MapCommand::Center { position, zoom });
    }
}

/// Print what changed between two view snapshots
fn render(previous: &PickerView, view: &PickerView) {
    if view.searching && !previous.searching {
        eprintln!("Buscando...");
    }
    if view.geocoding && !previous.geocoding {
        eprintln!("Obteniendo dirección...");
    }
    if view.suggestions_visible
        && (view.candidates != previous.candidates || !previous.suggestions_visible)
    {
        for (i, candidate) in view.candidates.iter().enumerate() {
            eprintln!("  [{}] {}", i, candidate.display_name);
        }
    }
    if view.notice != previous.notice {
        if let Some(notice) = view.notice {
            eprintln!("{}", notice);
        }
    }
}

fn dispatch(handle: &PickerHandle, line: Line) -> Result<()> {
    match line {
        Line::Type(text) => handle.input(text),
        Line::Pick(index) => handle.pick(index),
        Line::Click(position) => handle.map_click(position),
        Line::Drag(position) => handle.marker_drag_end(position),
        Line::Edit(text) => handle.edit_address(text),
        Line::Away => handle.click_away(),
        Line::Focus => handle.focus(),
        Line::Reset => handle.reset(),
        Line::Wait(_) | Line::Help | Line::Quit => Ok(()),
    }
}

/// Run the pick command
pub async fn run(args: PickArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(base_url) = args.base_url {
        config.geocoder.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(ms) = args.debounce_ms {
        config.picker.debounce_ms = ms;
    }

    let backend = Arc::new(get_geocoder(&config)?);
    let sink = OnLocationChange(|location: ResolvedLocation| {
        match serde_json::to_string(&location) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "could not serialize location"),
        }
    });
    let options = PickerOptions {
        initial_address: args.address,
        disabled: false,
    };

    let (picker, handle) = LocationPicker::new(backend, TerminalMap, sink, &config, options);
    let mut views = picker.subscribe();
    let driver = tokio::spawn(picker.run());
    let watcher = tokio::spawn(async move {
        let mut previous = views.borrow().clone();
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            render(&previous, &view);
            previous = view;
        }
    });

    eprintln!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Line::Quit) => break,
            Ok(Line::Help) => eprintln!("{}", HELP),
            Ok(Line::Wait(ms)) => tokio::time::sleep(Duration::from_millis(ms)).await,
            Ok(line) => dispatch(&handle, line)?,
            Err(msg) => eprintln!("{}", msg),
        }
    }

    drop(handle);
    let _ = driver.await;
    let _ = watcher.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_typing() {
        assert_eq!(
            parse_line("av amazonas").unwrap(),
            Line::Type("av amazonas".to_string())
        );
        assert_eq!(parse_line("").unwrap(), Line::Type(String::new()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(":pick 2").unwrap(), Line::Pick(2));
        assert_eq!(
            parse_line(":click -0.18 -78.47").unwrap(),
            Line::Click(Coordinates::new(-0.18, -78.47))
        );
        assert_eq!(
            parse_line(":d 1.5 2.5").unwrap(),
            Line::Drag(Coordinates::new(1.5, 2.5))
        );
        assert_eq!(
            parse_line(":edit Salón Los Andes").unwrap(),
            Line::Edit("Salón Los Andes".to_string())
        );
        assert_eq!(parse_line(":wait 600").unwrap(), Line::Wait(600));
        assert_eq!(parse_line(":away").unwrap(), Line::Away);
        assert_eq!(parse_line(":q").unwrap(), Line::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line(":pick").is_err());
        assert!(parse_line(":pick x").is_err());
        assert!(parse_line(":click 1").is_err());
        assert!(parse_line(":click abc 1").is_err());
        assert!(parse_line(":fly").is_err());
    }

    #[tokio::test]
    async fn test_dispatch_after_close() {
        let (picker, handle) = LocationPicker::new(
            Arc::new(crate::geo::testing::ScriptedBackend::new()),
            TerminalMap,
            tokio::sync::mpsc::unbounded_channel::<ResolvedLocation>().0,
            &Config::default(),
            PickerOptions::default(),
        );
        drop(picker);

        assert!(dispatch(&handle, Line::Focus).is_err());
        assert!(dispatch(&handle, Line::Wait(1)).is_ok());
    }
}
