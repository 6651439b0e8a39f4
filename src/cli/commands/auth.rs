//! Auth command handlers

use crate::auth::Provider;
use crate::state::SharedState;

pub async fn cmd_login(state: &SharedState, code: Option<&str>) -> anyhow::Result<()> {
    let code = match code {
        Some(code) => code.trim().to_string(),
        None => {
            let url = state.annict_auth.authorization_url()?;
            println!("Open this URL in a browser and grant access:");
            println!();
            println!("  {url}");
            println!();
            println!(
                "You will be redirected to {} with a 'code' parameter.",
                state.config.annict.redirect_uri
            );
            println!("Paste the code here:");

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            input.trim().to_string()
        }
    };

    if code.is_empty() {
        println!("No code entered. Cancelled.");
        return Ok(());
    }

    state.annict_auth.handle_authorization_code(&code).await?;
    println!("Signed in to Annict.");

    Ok(())
}

pub async fn cmd_auth_status(state: &SharedState) -> anyhow::Result<()> {
    if state.tokens.has_valid_token(Provider::Annict).await? {
        println!("Annict: signed in");
    } else {
        println!("Annict: not signed in (run 'kiroku auth login')");
    }

    if state.mal.is_configured() {
        println!("MyAnimeList: API key configured");
    } else {
        println!("MyAnimeList: no API key in config.toml");
    }

    Ok(())
}

pub async fn cmd_logout(state: &SharedState) -> anyhow::Result<()> {
    state.tokens.clear(Provider::Annict).await?;
    println!("Signed out of Annict.");
    Ok(())
}
