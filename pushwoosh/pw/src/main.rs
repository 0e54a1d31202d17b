#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! pw is a command line application based on Pushwoosh remote API.
//!
//! If application code is "XXXXX-XXXXX" and API access token is "token",
//!
//! ```
//! $ pw -a XXXXX-XXXXX -t token send -m message
//! ```
//!
//! Or you can set environment variables instead,
//!
//! ```
//! $ export PUSHWOOSH_APP_CODE=XXXXX-XXXXX
//! $ export PUSHWOOSH_AUTH_TOKEN=token
//! $ echo message | pw send --device device-token
//! $ pw delete ABCD-1234
//! ```
//!
//! For more information,
//!
//! ```
//! $ pw -h
//! ```

use anyhow::bail;
use clap::{Parser, Subcommand};
use log::{debug, Level};
use logging_timer::{finish, stimer};

use pushwoosh::{Client, Config, Reply, DEFAULT_API_VERSION, DEFAULT_HOST};

#[doc(hidden)]
#[derive(Parser)]
#[clap(about, author, version)]
struct Opts {
    /// Your application code, e.g. XXXXX-XXXXX.
    #[clap(short, long, env = "PUSHWOOSH_APP_CODE")]
    app_code: String,
    /// Your API access token.
    #[clap(short = 't', long, env = "PUSHWOOSH_AUTH_TOKEN")]
    auth_token: String,
    /// API host.
    #[clap(long, env = "PUSHWOOSH_HOST", default_value = DEFAULT_HOST)]
    host: String,
    /// API version.
    #[clap(long, env = "PUSHWOOSH_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,
    /// Verbose.
    #[clap(short, long)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[doc(hidden)]
#[derive(Subcommand)]
enum Command {
    /// Send a message right now.
    Send {
        /// Your message, read from standard input if omitted.
        #[clap(short, long)]
        message: Option<String>,
        /// Device token to send the message directly to that device, rather than all devices.
        #[clap(short, long)]
        device: Option<String>,
    },
    /// Delete a scheduled message.
    Delete {
        /// Message code returned when the message was created.
        code: String,
    },
}

fn read_message(message: Option<String>) -> anyhow::Result<String> {
    use std::io::Read as _;

    if let Some(m) = message {
        return Ok(m);
    }
    if atty::is(atty::Stream::Stdin) {
        bail!("message is required, either --message or standard input");
    }
    debug!("read message from standard input");
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

#[doc(hidden)]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts: Opts = Opts::parse();

    let config = Config {
        host: opts.host,
        api_version: opts.api_version,
    };
    let client = Client::with_config(opts.app_code, opts.auth_token, config)?;

    let tmr = stimer!(Level::Debug; "PUSHWOOSH");
    let reply = match opts.command {
        Command::Send { message, device } => {
            let message = read_message(message)?;
            client.send_message(&message, device.as_deref()).await?
        }
        Command::Delete { code } => client.delete_message(&code).await?,
    };
    finish!(tmr);

    if let Reply::Rejected(ref r) = reply {
        bail!(format!("{r:?}"));
    } else if opts.verbose {
        println!("{}", serde_json::to_string(&reply)?);
    }
    Ok(())
}
