//! Headless commands that talk to the API.

use std::io::{Write, stdout};

use anyhow::{Context, Result};
use plaza_core::api::ApiClient;
use plaza_core::models::Post;
use plaza_core::session::{SessionState, SessionStore};
use plaza_core::validate;
use plaza_tui::common::plural;

fn store(base_url: &str) -> Result<SessionStore> {
    let api = ApiClient::new(base_url).context("create API client")?;
    Ok(SessionStore::new(api))
}

async fn sign_in(store: &SessionStore, username: &str, password: &str) -> Result<()> {
    for (label, value) in [("username", username), ("password", password)] {
        if let Some(message) = validate::required(value) {
            anyhow::bail!("{label}: {message}");
        }
    }
    store
        .login(username.trim(), password)
        .await
        .context("sign in")?;
    Ok(())
}

/// Signs in, then asks the server who the session cookie belongs to.
pub async fn whoami(base_url: &str, username: &str, password: &str) -> Result<()> {
    let store = store(base_url)?;
    sign_in(&store, username, password).await?;
    match store.refresh().await {
        SessionState::Authenticated(user) => {
            println!("{} (@{})", user.display_name(), user.username);
        }
        SessionState::Anonymous | SessionState::Loading => println!("Not signed in"),
    }
    Ok(())
}

pub async fn feed(base_url: &str, username: &str, password: &str) -> Result<()> {
    let store = store(base_url)?;
    sign_in(&store, username, password).await?;
    let posts = store.api().feed().await.context("load feed")?;
    tracing::debug!(count = posts.len(), "feed loaded");

    let mut out = stdout().lock();
    if posts.is_empty() {
        writeln!(out, "No posts yet.")?;
        return Ok(());
    }
    for post in &posts {
        write_post(&mut out, post)?;
    }
    Ok(())
}

pub async fn post(base_url: &str, username: &str, password: &str, message: &str) -> Result<()> {
    if let Some(error) = validate::content(message) {
        anyhow::bail!("{error}");
    }

    let store = store(base_url)?;
    sign_in(&store, username, password).await?;
    store
        .api()
        .create_post(message.trim())
        .await
        .context("create post")?;
    println!("Posted.");
    Ok(())
}

fn write_post(out: &mut impl Write, post: &Post) -> Result<()> {
    writeln!(out, "{}", post.author_name())?;
    for line in post.content.lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(
        out,
        "  {} · {}",
        plural(post.likes.len(), "like", "likes"),
        plural(post.comments.len(), "comment", "comments")
    )?;
    writeln!(out)?;
    Ok(())
}
