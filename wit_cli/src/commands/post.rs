use anyhow::Result;
use clap::Args;
use wit_api::{Params, Wit, WitResponse};

use super::params::{parse_json_object, parse_params};

#[derive(Args)]
pub struct PostArgs {
    /// Endpoint path (e.g. /entities, /samples)
    pub endpoint: String,

    /// Body field as key=value (repeatable, overrides --json fields)
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,

    /// Full JSON object to send as the body
    #[arg(long)]
    pub json: Option<String>,
}

pub async fn run(args: &PostArgs, wit: &Wit) -> Result<WitResponse> {
    let mut body = match args.json {
        Some(ref raw) => parse_json_object(raw)?,
        None => Params::new(),
    };
    body.extend(parse_params(&args.params)?);

    Ok(wit.post(&args.endpoint, body).await?)
}
