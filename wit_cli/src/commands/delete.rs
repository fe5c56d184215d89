use anyhow::Result;
use clap::Args;
use wit_api::{Wit, WitResponse};

use super::params::parse_params;

#[derive(Args)]
pub struct DeleteArgs {
    /// Endpoint path (e.g. /entities/city)
    pub endpoint: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,
}

pub async fn run(args: &DeleteArgs, wit: &Wit) -> Result<WitResponse> {
    let params = parse_params(&args.params)?;
    Ok(wit.delete(&args.endpoint, params).await?)
}
