//! Print the OpenAPI document as JSON.

use color_eyre::eyre::Result;
use invitation_backend::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
