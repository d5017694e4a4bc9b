use anyhow::Context;
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

use folio::artists::spotify::{Credentials, SpotifyClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "Serves the top-artists endpoint", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "127.0.0.1:3000", help = "Address to listen on")]
    bind: SocketAddr,
    #[arg(short, long, help = "Settings file with client_id, client_secret and refresh_token")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    folio::logging::init();

    let args = Args::parse();

    let credentials = Credentials::load(args.config.as_deref())
        .context("missing Spotify credentials")?;
    let client = SpotifyClient::new(credentials)?;

    folio::artists::serve::serve(args.bind, &client)
}
