use anyhow::Result;
use clap::Args;
use wit_api::{Wit, WitResponse};

use super::params::parse_params;

#[derive(Args)]
pub struct GetArgs {
    /// Endpoint path (e.g. message, /entities)
    pub endpoint: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,
}

pub async fn run(args: &GetArgs, wit: &Wit) -> Result<WitResponse> {
    let params = parse_params(&args.params)?;
    Ok(wit.send_request("GET", &args.endpoint, params).await?)
}
