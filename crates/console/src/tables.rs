//! Fixed-width table rendering for the three entity lists.

use std::io::{self, Write};

use common::text::{or_na, truncate};
use models::{Customer, Movie, Theater};

pub const SEPARATOR_WIDTH: usize = 80;

pub fn separator() -> String { "=".repeat(SEPARATOR_WIDTH) }

pub fn line() -> String { "-".repeat(SEPARATOR_WIDTH) }

pub fn id_cell(id: Option<u64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

fn footer<W: Write>(out: &mut W, count: usize, kind: &str) -> io::Result<()> {
    writeln!(out, "{}", line())?;
    writeln!(out, "Total: {count} {kind}(s)")
}

pub fn write_customers<W: Write>(out: &mut W, customers: &[Customer]) -> io::Result<()> {
    if customers.is_empty() {
        return writeln!(out, "\nNo customers found.");
    }
    writeln!(out, "\n{}", line())?;
    writeln!(
        out,
        "{:<5} {:<20} {:<20} {:<30} {:<15} {:<8}",
        "ID", "First Name", "Last Name", "Email", "Phone", "Points"
    )?;
    writeln!(out, "{}", line())?;
    for c in customers {
        writeln!(
            out,
            "{:<5} {:<20} {:<20} {:<30} {:<15} {:<8}",
            id_cell(c.meta.id),
            truncate(&c.first_name, 20),
            truncate(&c.last_name, 20),
            truncate(or_na(c.email.as_deref()), 30),
            truncate(or_na(c.phone_number.as_deref()), 15),
            c.loyalty_points(),
        )?;
    }
    footer(out, customers.len(), "customer")
}

pub fn write_movies<W: Write>(out: &mut W, movies: &[Movie]) -> io::Result<()> {
    if movies.is_empty() {
        return writeln!(out, "\nNo movies found.");
    }
    writeln!(out, "\n{}", line())?;
    writeln!(
        out,
        "{:<5} {:<30} {:<15} {:<12} {:<20} {:<10} {:<8}",
        "ID", "Title", "Genre", "Duration", "Director", "Language", "Rating"
    )?;
    writeln!(out, "{}", line())?;
    for m in movies {
        writeln!(
            out,
            "{:<5} {:<30} {:<15} {:<12} {:<20} {:<10} {:<8.1}",
            id_cell(m.meta.id),
            truncate(&m.title, 30),
            truncate(&m.genre, 15),
            m.formatted_duration(),
            truncate(or_na(m.director.as_deref()), 20),
            truncate(or_na(m.language.as_deref()), 10),
            m.rating,
        )?;
    }
    footer(out, movies.len(), "movie")
}

pub fn write_theaters<W: Write>(out: &mut W, theaters: &[Theater]) -> io::Result<()> {
    if theaters.is_empty() {
        return writeln!(out, "\nNo theaters found.");
    }
    writeln!(out, "\n{}", line())?;
    writeln!(
        out,
        "{:<5} {:<25} {:<10} {:<15} {:<12} {:<10}",
        "ID", "Name", "Capacity", "Screen Type", "Wheelchair", "Movies"
    )?;
    writeln!(out, "{}", line())?;
    for t in theaters {
        writeln!(
            out,
            "{:<5} {:<25} {:<10} {:<15} {:<12} {:<10}",
            id_cell(t.meta.id),
            truncate(&t.name, 25),
            t.capacity,
            truncate(&t.screen_type, 15),
            if t.has_wheelchair_access { "Yes" } else { "No" },
            t.current_movie_ids().len(),
        )?;
    }
    footer(out, theaters.len(), "theater")
}
