use comfy_table::{presets, modifiers, Attribute, Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;
use wishlist_models::{Comment, ExternalCandidate, Movie, MovieStatus};

fn styled_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        header
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn heart(liked: bool) -> String {
    if liked {
        "♥".red().to_string()
    } else {
        "♡".to_string()
    }
}

pub fn movie_table(movies: &[Movie]) -> Table {
    let mut table = styled_table(vec!["ID", "Title", "Year", "Genre", "Rating", "Likes", "Comments"]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(or_dash(movie.release_year)),
            Cell::new(or_dash(movie.genre.as_deref())),
            Cell::new(or_dash(movie.rating.map(|r| format!("{}/10", r)))),
            Cell::new(format!("{} {}", heart(movie.user_liked), movie.likes_count)),
            Cell::new(movie.comments_count),
        ]);
    }
    table
}

pub fn candidate_table(candidates: &[ExternalCandidate]) -> Table {
    let mut table = styled_table(vec!["IMDb ID", "Title", "Year"]);
    for candidate in candidates {
        table.add_row(vec![
            Cell::new(&candidate.external_id),
            Cell::new(&candidate.title),
            Cell::new(&candidate.year),
        ]);
    }
    table
}

pub fn movie_details(movie: &Movie) -> Table {
    let mut table = styled_table(vec!["Movie", movie.title.as_str()]);
    let status = match movie.status {
        MovieStatus::Wishlist => "Wishlist".yellow().to_string(),
        MovieStatus::Watched => "Watched".green().to_string(),
    };
    let rows: Vec<(&str, String)> = vec![
        ("ID", movie.id.to_string()),
        ("Status", status),
        ("Genre", or_dash(movie.genre.as_deref())),
        ("Released", or_dash(movie.release_year)),
        ("Runtime", or_dash(movie.runtime.map(|r| format!("{} min", r)))),
        ("Rating", or_dash(movie.rating.map(|r| format!("{}/10", r)))),
        ("Review", or_dash(movie.review.as_deref())),
        ("Likes", format!("{} {}", heart(movie.user_liked), movie.likes_count)),
        ("Added by", or_dash(movie.username.as_deref())),
        ("Poster", or_dash(movie.poster_url.as_deref())),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn comment_lines(comments: &[Comment]) -> Vec<String> {
    comments
        .iter()
        .map(|c| {
            format!(
                "{} {} {}",
                c.username.as_deref().unwrap_or("anonymous").bright_cyan(),
                c.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
                c.content
            )
        })
        .collect()
}

/// Spinner on interactive terminals, hidden otherwise.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if !(std::io::stdout().is_terminal() && std::io::stderr().is_terminal()) {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
