//! HTML rendering for the directory pages
//!
//! Pages are assembled as strings through a shared layout shell; handlers
//! wrap the result in `axum::response::Html`. All user-sourced values pass
//! through [`escape`] before interpolation.

use crate::datefmt::{format_datetime, DateStyle};
use crate::directory::{
    ArtistDetail, CityGroup, SearchResults, ShowBoardEntry, ShowCard, VenueDetail,
};
use stagebook_common::db::models::{Artist, Venue};

/// Shared stylesheet; kept out of the format strings so braces stay plain.
const STYLE: &str = "
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background-color: #1a1a1a;
    color: #e0e0e0;
    line-height: 1.6;
}
header {
    background-color: #2a2a2a;
    border-bottom: 1px solid #3a3a3a;
    padding: 16px 24px;
    display: flex;
    justify-content: space-between;
    align-items: center;
}
header h1 { font-size: 22px; color: #4a9eff; }
header h1 a { color: inherit; text-decoration: none; }
nav a {
    color: #e0e0e0;
    text-decoration: none;
    margin-left: 16px;
}
nav a:hover { color: #4a9eff; }
.content { padding: 24px; max-width: 900px; margin: 0 auto; }
h2 { color: #4a9eff; margin-bottom: 12px; }
h3 { color: #888; margin: 16px 0 8px; }
ul.plain { list-style: none; }
ul.plain li { padding: 6px 0; border-bottom: 1px solid #2a2a2a; }
a { color: #4a9eff; }
.flash {
    background: #10b981;
    color: #fff;
    padding: 10px 16px;
    border-radius: 4px;
    margin-bottom: 20px;
}
.muted { color: #888; font-size: 14px; }
.badge {
    display: inline-block;
    background: #2a2a2a;
    border-radius: 10px;
    padding: 2px 10px;
    margin-right: 6px;
    font-size: 13px;
}
.card {
    background: #222;
    border: 1px solid #3a3a3a;
    border-radius: 6px;
    padding: 14px;
    margin-bottom: 12px;
}
.card img { max-height: 60px; border-radius: 4px; margin-right: 10px; vertical-align: middle; }
form.stacked label { display: block; margin-top: 12px; color: #888; }
form.stacked input[type=text], form.stacked input[type=datetime-local], form.stacked textarea {
    width: 100%;
    padding: 8px;
    background: #111;
    border: 1px solid #3a3a3a;
    border-radius: 4px;
    color: #e0e0e0;
}
form.inline input[type=text] {
    padding: 8px;
    background: #111;
    border: 1px solid #3a3a3a;
    border-radius: 4px;
    color: #e0e0e0;
}
.button, button {
    display: inline-block;
    padding: 8px 18px;
    background: #4a9eff;
    color: #fff;
    border: none;
    border-radius: 4px;
    margin-top: 14px;
    font-weight: 600;
    text-decoration: none;
    cursor: pointer;
}
button.danger { background: #ef4444; }
";

/// Escape text for interpolation into HTML
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn flash_banner(flash: Option<&str>) -> String {
    match flash {
        Some(message) => format!(r#"<div class="flash">{}</div>"#, escape(message)),
        None => String::new(),
    }
}

/// Shared page shell: header, nav, flash banner, body
fn layout(title: &str, flash: Option<&str>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} | Stagebook</title>
<style>{style}</style>
</head>
<body>
<header>
    <h1><a href="/">Stagebook</a></h1>
    <nav>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <a href="/venues/create">List a Venue</a>
        <a href="/artists/create">List an Artist</a>
        <a href="/shows/create">Book a Show</a>
    </nav>
</header>
<div class="content">
{banner}
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        banner = flash_banner(flash),
        body = body,
    )
}

pub fn home_page(flash: Option<&str>) -> String {
    let body = "<h2>Find your next show</h2>\
         <p>Browse <a href=\"/venues\">venues</a> and <a href=\"/artists\">artists</a>, \
         or check the <a href=\"/shows\">show board</a>.</p>";
    layout("Home", flash, body)
}

fn search_box(action: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{action}">
<input type="text" name="search_term" placeholder="Search by name">
<button type="submit">Search</button>
</form>"#,
    )
}

pub fn venues_page(groups: &[CityGroup]) -> String {
    let mut body = String::from("<h2>Venues</h2>");
    body.push_str(&search_box("/venues/search"));
    for group in groups {
        body.push_str(&format!(
            "<h3>{}, {}</h3><ul class=\"plain\">",
            escape(&group.city),
            escape(&group.state)
        ));
        for venue in &group.venues {
            body.push_str(&format!(
                r#"<li><a href="/venues/{id}">{name}</a> <span class="muted">{count} upcoming</span></li>"#,
                id = venue.id,
                name = escape(&venue.name),
                count = venue.upcoming_count,
            ));
        }
        body.push_str("</ul>");
    }
    if groups.is_empty() {
        body.push_str(r#"<p class="muted">No venues listed yet.</p>"#);
    }
    layout("Venues", None, &body)
}

pub fn artists_page(artists: &[Artist]) -> String {
    let mut body = String::from("<h2>Artists</h2>");
    body.push_str(&search_box("/artists/search"));
    body.push_str("<ul class=\"plain\">");
    for artist in artists {
        body.push_str(&format!(
            r#"<li><a href="/artists/{id}">{name}</a></li>"#,
            id = artist.id,
            name = escape(&artist.name),
        ));
    }
    body.push_str("</ul>");
    if artists.is_empty() {
        body.push_str(r#"<p class="muted">No artists listed yet.</p>"#);
    }
    layout("Artists", None, &body)
}

fn search_results_body(kind: &str, base: &str, term: &str, results: &SearchResults) -> String {
    let mut body = format!(
        "<h2>{kind} search</h2><p class=\"muted\">{count} result(s) for \"{term}\"</p><ul class=\"plain\">",
        kind = kind,
        count = results.count,
        term = escape(term),
    );
    for item in &results.items {
        body.push_str(&format!(
            r#"<li><a href="{base}/{id}">{name}</a> <span class="muted">{count} upcoming</span></li>"#,
            base = base,
            id = item.id,
            name = escape(&item.name),
            count = item.upcoming_count,
        ));
    }
    body.push_str("</ul>");
    body
}

pub fn venue_search_page(term: &str, results: &SearchResults) -> String {
    layout(
        "Venue search",
        None,
        &search_results_body("Venue", "/venues", term, results),
    )
}

pub fn artist_search_page(term: &str, results: &SearchResults) -> String {
    layout(
        "Artist search",
        None,
        &search_results_body("Artist", "/artists", term, results),
    )
}

fn genre_badges(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="badge">{}</span>"#, escape(g)))
        .collect()
}

fn show_cards(cards: &[ShowCard], base: &str) -> String {
    if cards.is_empty() {
        return r#"<p class="muted">None.</p>"#.to_string();
    }
    let mut out = String::new();
    for card in cards {
        let image = card
            .image_link
            .as_deref()
            .map(|link| format!(r#"<img src="{}" alt="">"#, escape(link)))
            .unwrap_or_default();
        out.push_str(&format!(
            r#"<div class="card">{image}<a href="{base}/{id}">{name}</a>
<div class="muted">{start}</div></div>"#,
            image = image,
            base = base,
            id = card.id,
            name = escape(&card.name),
            start = format_datetime(card.start_time, DateStyle::Medium),
        ));
    }
    out
}

fn optional_link(label: &str, link: &Option<String>) -> String {
    match link {
        Some(url) => {
            let escaped = escape(url);
            format!(r#"<p class="muted">{label}: <a href="{escaped}">{escaped}</a></p>"#)
        }
        None => String::new(),
    }
}

/// Small script wired to the delete button: issues a DELETE and follows the
/// redirect the server answers with.
fn delete_button(path: &str, label: &str) -> String {
    format!(
        r#"<button class="danger" onclick="fetch('{path}', {{method: 'DELETE'}}).then(r => window.location = r.url || '/')">{label}</button>"#,
    )
}

pub fn venue_detail_page(detail: &VenueDetail, flash: Option<&str>) -> String {
    let venue = &detail.venue;
    let mut body = format!(
        "<h2>{name}</h2><div>{genres}</div>\
         <p class=\"muted\">{address}, {city}, {state}</p>\
         <p class=\"muted\">Phone: {phone}</p>",
        name = escape(&venue.name),
        genres = genre_badges(&venue.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(&venue.phone),
    );
    body.push_str(&optional_link("Website", &venue.website));
    body.push_str(&optional_link("Facebook", &venue.facebook_link));
    if venue.seeking_talent {
        body.push_str(&format!(
            r#"<p>Seeking talent: {}</p>"#,
            escape(venue.seeking_description.as_deref().unwrap_or(""))
        ));
    }
    body.push_str(&format!(
        "<h3>{} upcoming show(s)</h3>{}",
        detail.upcoming.len(),
        show_cards(&detail.upcoming, "/artists"),
    ));
    body.push_str(&format!(
        "<h3>{} past show(s)</h3>{}",
        detail.past.len(),
        show_cards(&detail.past, "/artists"),
    ));
    body.push_str(&format!(
        r#"<a class="button" href="/venues/{}/edit">Edit</a> "#,
        venue.id
    ));
    body.push_str(&delete_button(&format!("/venues/{}", venue.id), "Delete venue"));
    layout(&venue.name, flash, &body)
}

pub fn artist_detail_page(detail: &ArtistDetail, flash: Option<&str>) -> String {
    let artist = &detail.artist;
    let mut body = format!(
        "<h2>{name}</h2><div>{genres}</div>\
         <p class=\"muted\">{city}, {state}</p>",
        name = escape(&artist.name),
        genres = genre_badges(&artist.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
    );
    if let Some(phone) = &artist.phone {
        body.push_str(&format!(r#"<p class="muted">Phone: {}</p>"#, escape(phone)));
    }
    body.push_str(&optional_link("Website", &artist.website));
    body.push_str(&optional_link("Facebook", &artist.facebook_link));
    if artist.seeking_venue {
        body.push_str(&format!(
            r#"<p>Seeking venues: {}</p>"#,
            escape(artist.seeking_description.as_deref().unwrap_or(""))
        ));
    }
    body.push_str(&format!(
        "<h3>{} upcoming show(s)</h3>{}",
        detail.upcoming.len(),
        show_cards(&detail.upcoming, "/venues"),
    ));
    body.push_str(&format!(
        "<h3>{} past show(s)</h3>{}",
        detail.past.len(),
        show_cards(&detail.past, "/venues"),
    ));
    body.push_str(&format!(
        r#"<a class="button" href="/artists/{}/edit">Edit</a> "#,
        artist.id
    ));
    body.push_str(&delete_button(&format!("/artists/{}", artist.id), "Delete artist"));
    layout(&artist.name, flash, &body)
}

pub fn shows_page(entries: &[ShowBoardEntry]) -> String {
    let mut body = String::from("<h2>Shows</h2>");
    for entry in entries {
        let image = entry
            .artist_image_link
            .as_deref()
            .map(|link| format!(r#"<img src="{}" alt="">"#, escape(link)))
            .unwrap_or_default();
        body.push_str(&format!(
            r#"<div class="card">{image}<a href="/artists/{artist_id}">{artist}</a>
<span class="muted">at</span> <a href="/venues/{venue_id}">{venue}</a>
<div class="muted">{start}</div></div>"#,
            image = image,
            artist_id = entry.artist_id,
            artist = escape(&entry.artist_name),
            venue_id = entry.venue_id,
            venue = escape(&entry.venue_name),
            start = format_datetime(entry.start_time, DateStyle::Medium),
        ));
    }
    if entries.is_empty() {
        body.push_str(r#"<p class="muted">No shows booked yet.</p>"#);
    }
    layout("Shows", None, &body)
}

fn text_field(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label}<input type="text" name="{name}" value="{value}"></label>"#,
        label = label,
        name = name,
        value = escape(value),
    )
}

fn checkbox_field(label: &str, name: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{name}" value="y"{checked}> {label}</label>"#,
        name = name,
        checked = if checked { " checked" } else { "" },
        label = label,
    )
}

/// Venue form: empty for create, prefilled for edit
pub fn venue_form_page(action: &str, title: &str, venue: Option<&Venue>) -> String {
    let get = |f: fn(&Venue) -> String| venue.map(f).unwrap_or_default();
    let mut body = format!("<h2>{}</h2><form class=\"stacked\" method=\"post\" action=\"{}\">", escape(title), action);
    body.push_str(&text_field("Name", "name", &get(|v| v.name.clone())));
    body.push_str(&text_field("City", "city", &get(|v| v.city.clone())));
    body.push_str(&text_field("State", "state", &get(|v| v.state.clone())));
    body.push_str(&text_field("Address", "address", &get(|v| v.address.clone())));
    body.push_str(&text_field("Phone", "phone", &get(|v| v.phone.clone())));
    body.push_str(&text_field(
        "Genres (comma separated)",
        "genres",
        &get(|v| v.genres.join(", ")),
    ));
    body.push_str(&text_field(
        "Website",
        "website",
        &get(|v| v.website.clone().unwrap_or_default()),
    ));
    body.push_str(&text_field(
        "Facebook link",
        "facebook_link",
        &get(|v| v.facebook_link.clone().unwrap_or_default()),
    ));
    body.push_str(&text_field(
        "Image link",
        "image_link",
        &get(|v| v.image_link.clone().unwrap_or_default()),
    ));
    body.push_str(&checkbox_field(
        "Seeking talent",
        "seeking_talent",
        venue.map(|v| v.seeking_talent).unwrap_or(false),
    ));
    body.push_str(&text_field(
        "Seeking description",
        "seeking_description",
        &get(|v| v.seeking_description.clone().unwrap_or_default()),
    ));
    body.push_str(r#"<button type="submit">Save</button></form>"#);
    layout(title, None, &body)
}

/// Artist form: empty for create, prefilled for edit
pub fn artist_form_page(action: &str, title: &str, artist: Option<&Artist>) -> String {
    let get = |f: fn(&Artist) -> String| artist.map(f).unwrap_or_default();
    let mut body = format!("<h2>{}</h2><form class=\"stacked\" method=\"post\" action=\"{}\">", escape(title), action);
    body.push_str(&text_field("Name", "name", &get(|a| a.name.clone())));
    body.push_str(&text_field("City", "city", &get(|a| a.city.clone())));
    body.push_str(&text_field("State", "state", &get(|a| a.state.clone())));
    body.push_str(&text_field(
        "Phone",
        "phone",
        &get(|a| a.phone.clone().unwrap_or_default()),
    ));
    body.push_str(&text_field(
        "Genres (comma separated)",
        "genres",
        &get(|a| a.genres.join(", ")),
    ));
    body.push_str(&text_field(
        "Website",
        "website",
        &get(|a| a.website.clone().unwrap_or_default()),
    ));
    body.push_str(&text_field(
        "Facebook link",
        "facebook_link",
        &get(|a| a.facebook_link.clone().unwrap_or_default()),
    ));
    body.push_str(&text_field(
        "Image link",
        "image_link",
        &get(|a| a.image_link.clone().unwrap_or_default()),
    ));
    body.push_str(&checkbox_field(
        "Seeking a venue",
        "seeking_venue",
        artist.map(|a| a.seeking_venue).unwrap_or(false),
    ));
    body.push_str(&text_field(
        "Seeking description",
        "seeking_description",
        &get(|a| a.seeking_description.clone().unwrap_or_default()),
    ));
    body.push_str(r#"<button type="submit">Save</button></form>"#);
    layout(title, None, &body)
}

pub fn show_form_page() -> String {
    let body = r#"<h2>Book a show</h2><form class="stacked" method="post" action="/shows/create">
<label>Artist ID<input type="text" name="artist_id"></label>
<label>Venue ID<input type="text" name="venue_id"></label>
<label>Start time<input type="datetime-local" name="start_time"></label>
<button type="submit">Book</button></form>"#;
    layout("Book a show", None, body)
}

pub fn not_found_page() -> String {
    layout(
        "Not found",
        None,
        r#"<h2>404</h2><p>That page does not exist. <a href="/">Back home</a>.</p>"#,
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server error",
        None,
        r#"<h2>500</h2><p>Something went wrong on our side. <a href="/">Back home</a>.</p>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>"A & B's"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn layout_includes_flash_banner_when_present() {
        let page = home_page(Some("Venue Spot is successfully listed!"));
        assert!(page.contains("class=\"flash\""));
        assert!(page.contains("successfully listed"));

        let page = home_page(None);
        assert!(!page.contains("class=\"flash\""));
    }

    #[test]
    fn venue_form_prefills_nothing_for_create() {
        let page = venue_form_page("/venues/create", "List a venue", None);
        assert!(page.contains(r#"name="phone" value="""#));
    }
}
