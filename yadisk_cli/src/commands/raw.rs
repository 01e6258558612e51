use anyhow::Result;
use clap::Args;
use yadisk_api::{Client, Context, Destination, Method};

#[derive(Args)]
pub struct RawArgs {
    /// Endpoint path relative to the API root, e.g. `disk` or `disk/resources`
    pub endpoint: String,

    /// Query parameters as key=value pairs
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

pub async fn run(args: &RawArgs, client: &Client, ctx: &Context) -> Result<()> {
    let mut request = client.new_request(Method::GET, &args.endpoint)?;
    for (key, value) in &args.params {
        request.url_mut().query_pairs_mut().append_pair(key, value);
    }

    let mut stdout = tokio::io::stdout();
    let head = client
        .execute(ctx, request, Destination::raw(&mut stdout))
        .await?;
    tracing::debug!(status = %head.status, "Raw response written");
    Ok(())
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("path=disk:/a=b").unwrap(),
            ("path".to_string(), "disk:/a=b".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }
}
