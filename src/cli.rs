use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use geomark_core::{
    entities::{Coordinate, GeocodeResult, MapRegion, Placemark},
    gateways::geocode::GeoCodingGateway,
};
use std::path::PathBuf;

use crate::{config::Config, gateways, screen};

#[derive(Debug, Parser)]
#[command(version, about = "Shows where you are and finds places on a map")]
pub struct Args {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Track the (replayed) device location and search places interactively
    Run,
    /// Forward geocode an address
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Reverse geocode a position
    #[command(allow_negative_numbers = true)]
    Reverse { lat: f64, lng: f64 },
}

pub fn run(args: Args) -> Result<()> {
    let cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    let geocoder = gateways::geocoding_gateway(cfg.geocoding.gateway.clone());
    match args.command.unwrap_or(Cmd::Run) {
        Cmd::Run => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(screen::run(cfg, geocoder))
        }
        Cmd::Search { query } => {
            let query = query.join(" ");
            let candidates = geocoder.forward(&query)?;
            let (pos, label) = first_position(&candidates)
                .ok_or_else(|| anyhow!("Location not found."))?;
            let region = MapRegion::square(pos, cfg.map.span);
            println!("{label}");
            println!("{pos}");
            println!(
                "Region: {:.5}° x {:.5}°",
                region.lat_delta_deg(),
                region.lng_delta_deg()
            );
            Ok(())
        }
        Cmd::Reverse { lat, lng } => {
            let pos = Coordinate::try_from_lat_lng_deg(lat, lng)
                .ok_or_else(|| anyhow!("Invalid position: {lat}, {lng}"))?;
            println!("{pos}");
            match geocoder.reverse(pos)?.first() {
                Some(placemark) => println!("{}", placemark.label()),
                None => log::info!("No address found for {pos}"),
            }
            Ok(())
        }
    }
}

fn first_position(candidates: &[Placemark]) -> Option<(Coordinate, String)> {
    match GeocodeResult::from_candidates(candidates) {
        GeocodeResult::Success(pos, address) => Some((pos, address.unwrap_or_default().joined())),
        GeocodeResult::Failure(..) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_reverse_with_negative_longitude() {
        let args = Args::parse_from(["geomark", "reverse", "47.6062", "-122.3321"]);
        assert!(matches!(
            args.command,
            Some(Cmd::Reverse { lat, lng }) if lat == 47.6062 && lng == -122.3321
        ));
    }

    #[test]
    fn parse_search_query_words() {
        let args = Args::parse_from(["geomark", "-c", "my.toml", "search", "Pike", "Place"]);
        assert_eq!(Some(PathBuf::from("my.toml")), args.config);
        let Some(Cmd::Search { query }) = args.command else {
            panic!("expected search");
        };
        assert_eq!(vec!["Pike", "Place"], query);
    }
}
