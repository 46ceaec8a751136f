//! Server-rendered HTML pages.

use std::fmt::Write;

use models::{input, Actor, Movie};

use crate::forms::{ActorForm, MovieForm};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn opt_num(v: Option<i32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>MovieCards - {title}</title>
</head>
<body>
<nav><a href="/movies">Movies</a> | <a href="/actors">Actors</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn notices(message: Option<&str>, error: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(m) = message {
        let _ = write!(out, r#"<p class="message">{}</p>"#, escape(m));
    }
    if let Some(e) = error {
        let _ = write!(out, r#"<p class="error">{}</p>"#, escape(e));
    }
    out
}

fn text_input(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{value}"></label><br>"#,
        label = escape(label),
        name = name,
        value = escape(value),
    )
}

pub fn movie_list(movies: &[Movie]) -> String {
    let mut rows = String::new();
    for m in movies {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&m.title),
            escape(&m.country),
            opt_num(m.release_date),
            escape(&m.director),
            escape(&m.genre),
            m.id.map(|id| format!(r#"<a href="/editMovie/{id}">Edit</a>"#)).unwrap_or_default(),
        );
    }
    let body = format!(
        r#"<p><a href="/movies/new">New movie</a></p>
<table class="movies">
<tr><th>Title</th><th>Country</th><th>Year</th><th>Director</th><th>Genre</th><th></th></tr>
{rows}</table>"#
    );
    layout("Movies", &body)
}

pub struct MovieFormPage<'a> {
    pub title: &'a str,
    pub message: Option<&'a str>,
    pub error: Option<&'a str>,
    pub form: &'a MovieForm,
    pub actors: &'a [Actor],
}

pub fn movie_form(page: &MovieFormPage<'_>) -> String {
    let f = page.form;
    let mut body = notices(page.message, page.error);
    let _ = write!(
        body,
        r#"<form method="post" action="/saveMovie">
<input type="hidden" name="id" value="{id}">
{title}{country}{year}{duration}{director}{genre}<label>Synopsis <textarea name="synopsis">{synopsis}</textarea></label><br>
<button type="submit">Save</button>
</form>
"#,
        id = escape(&f.id),
        title = text_input("Title", "title", &f.title),
        country = text_input("Country", "country", &f.country),
        year = text_input("Year", "releaseDate", &f.release_date),
        duration = text_input("Duration", "duration", &f.duration),
        director = text_input("Director", "director", &f.director),
        genre = text_input("Genre", "genre", &f.genre),
        synopsis = escape(&f.synopsis),
    );

    if f.has_id() {
        body.push_str("<h2>Cast</h2>\n<ul class=\"actors\">\n");
        for a in page.actors {
            let _ = writeln!(body, "<li>{}</li>", escape(&a.name));
        }
        body.push_str("</ul>\n");
        let _ = write!(
            body,
            r#"<form method="post" action="/registerActor">
<input type="hidden" name="movieId" value="{id}">
<label>Actor id <input type="number" name="actorId"></label>
<button type="submit">Register actor</button>
</form>
"#,
            id = escape(&f.id),
        );
    }
    layout(page.title, &body)
}

pub fn actor_list(actors: &[Actor]) -> String {
    let mut rows = String::new();
    for a in actors {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&a.name),
            input::format_date(a.birth_date),
            input::format_date(a.dead_date),
            escape(&a.country),
            a.id.map(|id| format!(r#"<a href="/editActor/{id}">Edit</a>"#)).unwrap_or_default(),
        );
    }
    let body = format!(
        r#"<p><a href="/actors/new">New actor</a></p>
<table class="actors">
<tr><th>Name</th><th>Born</th><th>Died</th><th>Country</th><th></th></tr>
{rows}</table>"#
    );
    layout("Actors", &body)
}

pub struct ActorFormPage<'a> {
    pub title: &'a str,
    pub message: Option<&'a str>,
    pub error: Option<&'a str>,
    pub form: &'a ActorForm,
    pub movies: &'a [Movie],
}

pub fn actor_form(page: &ActorFormPage<'_>) -> String {
    let f = page.form;
    let mut body = notices(page.message, page.error);
    let _ = write!(
        body,
        r#"<form method="post" action="/saveActor">
<input type="hidden" name="id" value="{id}">
{name}<label>Birth date <input type="date" name="birthDate" value="{birth}"></label><br>
<label>Death date <input type="date" name="deadDate" value="{dead}"></label><br>
{country}<button type="submit">Save</button>
</form>
"#,
        id = escape(&f.id),
        name = text_input("Name", "name", &f.name),
        birth = escape(&f.birth_date),
        dead = escape(&f.dead_date),
        country = text_input("Country", "country", &f.country),
    );

    if f.has_id() {
        body.push_str("<h2>Filmography</h2>\n<ul class=\"movies\">\n");
        for m in page.movies {
            let _ = writeln!(body, "<li>{}</li>", escape(&m.title));
        }
        body.push_str("</ul>\n");
    }
    layout(page.title, &body)
}

pub fn error_page(heading: &str, detail: &str) -> String {
    layout(heading, &format!(r#"<p class="error">{}</p>"#, escape(detail)))
}
