use std::io::Cursor;
use std::path::PathBuf;

use console::CinemaConsole;
use service::file::{CustomerRepository, MovieRepository, TheaterRepository};
use service::repository::Repository;
use service::{CustomerService, MovieService, TheaterService, WriteMode};
use uuid::Uuid;

struct Paths {
    dir: PathBuf,
    customers: PathBuf,
    movies: PathBuf,
    theaters: PathBuf,
}

fn paths() -> Paths {
    let dir = std::env::temp_dir().join(format!("cinema_session_{}", Uuid::new_v4()));
    Paths {
        customers: dir.join("customers.json"),
        movies: dir.join("movies.json"),
        theaters: dir.join("theaters.json"),
        dir,
    }
}

fn run_script(p: &Paths, script: &str) -> Result<String, anyhow::Error> {
    run_bytes(p, script.as_bytes().to_vec())
}

fn run_bytes(p: &Paths, input: Vec<u8>) -> Result<String, anyhow::Error> {
    let customers = CustomerService::new(CustomerRepository::open(&p.customers, WriteMode::Rewrite)?);
    let movies = MovieService::new(MovieRepository::open(&p.movies, WriteMode::AtomicReplace)?);
    let theaters = TheaterService::new(TheaterRepository::open(&p.theaters, WriteMode::Rewrite)?);
    let mut app = CinemaConsole::new(Cursor::new(input), Vec::new(), customers, movies, theaters);
    app.run()?;
    let (_, out) = app.into_inner();
    Ok(String::from_utf8(out)?)
}

#[test]
fn scripted_session_persists_every_change() -> Result<(), anyhow::Error> {
    let p = paths();
    let script = [
        // customers
        "1",
        "1", "Ann", "Lee", "", "", "",
        "6", "1", "-5", "",
        "6", "1", "20", "",
        "1", "John", "Doe", "john@example.com", "", "",
        "1", "Jane", "Doe", "JOHN@example.com", "",
        "5", "2", "n", "",
        "2", "",
        "0",
        // theaters
        "3",
        "1", "Hall A", "120", "IMAX", "",
        "6", "1", "7", "",
        "6", "1", "7", "",
        "0",
        // movies
        "2",
        "1", "Heat", "Crime", "600", "", "",
        "1", "Heat", "Crime", "abc", "170", "Michael Mann", "", "",
        "6", "1", "8.5", "",
        "0",
        // statistics, an unknown choice, exit
        "4", "",
        "9",
        "0",
    ]
    .join("\n")
        + "\n";

    let out = run_script(&p, &script)?;

    assert!(out.contains("✓ SUCCESS: Customer added successfully! ID: 1"));
    assert!(out.contains("✓ SUCCESS: Added -5 points. Total: 0"));
    assert!(out.contains("✓ SUCCESS: Added 20 points. Total: 20"));
    assert!(out.contains("✗ ERROR: Customer with email JOHN@example.com already exists"));
    assert!(out.contains("ℹ INFO: Deletion cancelled."));
    assert!(out.contains("Total: 2 customer(s)"));
    assert!(out.contains("✗ ERROR: Movie duration seems unrealistic (max 500 minutes)"));
    assert!(out.contains("Invalid input. Please enter a number: "));
    assert!(out.contains("✓ SUCCESS: Movie added successfully! ID: 1"));
    assert!(out.contains("Rating updated to 8.5 for: Heat"));
    assert!(out.contains("Total Customers: 2"));
    assert!(out.contains("Total Movies:    1"));
    assert!(out.contains("Total Theaters:  1"));
    assert!(out.contains("✗ ERROR: Invalid choice. Please try again."));
    assert!(out.contains("Thank you for using Cinema Management System!"));

    let customers = CustomerRepository::open(&p.customers, WriteMode::Rewrite)?;
    assert_eq!(customers.count(), 2);
    assert_eq!(customers.find_by_id(1).map(|c| c.loyalty_points()), Some(20));

    let theaters = TheaterRepository::open(&p.theaters, WriteMode::Rewrite)?;
    let hall = theaters.find_by_id(1).expect("theater persisted");
    assert_eq!(hall.current_movie_ids(), &[7]);

    let movies = MovieRepository::open(&p.movies, WriteMode::Rewrite)?;
    let heat = movies.find_by_id(1).expect("movie persisted");
    assert_eq!(heat.rating, 8.5);
    assert_eq!(heat.director.as_deref(), Some("Michael Mann"));
    assert_eq!(heat.language, None);

    let _ = std::fs::remove_dir_all(&p.dir);
    Ok(())
}

#[test]
fn lookups_of_missing_records_report_and_continue() -> Result<(), anyhow::Error> {
    let p = paths();
    let script = "1\n4\n42\n5\n42\n0\n3\n6\n1\n7\n0\n0\n";
    let out = run_script(&p, script)?;
    assert!(out.contains("✗ ERROR: Customer with ID 42 not found"));
    assert!(out.contains("✗ ERROR: Theater with ID 1 not found"));
    assert!(out.ends_with(&format!("{}\n", "=".repeat(80))));
    let _ = std::fs::remove_dir_all(&p.dir);
    Ok(())
}

#[test]
fn end_of_input_exits_cleanly() -> Result<(), anyhow::Error> {
    let p = paths();
    let out = run_script(&p, "1\n1\nAnn\n")?;
    assert!(out.contains("First Name: Last Name: "));
    assert!(!p.customers.exists());

    let again = run_script(&p, "")?;
    assert!(again.contains("MAIN MENU"));
    let _ = std::fs::remove_dir_all(&p.dir);
    Ok(())
}

#[test]
fn confirmed_delete_removes_the_record_from_disk() -> Result<(), anyhow::Error> {
    let p = paths();
    let script = [
        "1",
        "1", "Ann", "Lee", "", "", "",
        "1", "Bob", "Ray", "", "", "",
        "5", "1", "yes", "",
        "5", "1",
        "2", "",
        "0",
        "0",
    ]
    .join("\n")
        + "\n";
    let out = run_script(&p, &script)?;
    assert!(out.contains("✓ SUCCESS: Customer deleted successfully!"));
    assert!(out.contains("✗ ERROR: Customer with ID 1 not found"));
    assert!(out.contains("Total: 1 customer(s)"));

    let customers = CustomerRepository::open(&p.customers, WriteMode::Rewrite)?;
    assert_eq!(customers.count(), 1);
    assert!(customers.find_by_id(1).is_none());
    assert_eq!(customers.find_by_id(2).map(|c| c.first_name), Some("Bob".to_string()));
    let _ = std::fs::remove_dir_all(&p.dir);
    Ok(())
}

#[test]
fn undecodable_input_does_not_end_the_session() -> Result<(), anyhow::Error> {
    let p = paths();
    let mut input = vec![0xff, b'\n'];
    input.extend_from_slice(b"1\n1\n");
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(b"Lee\n\n\n\n0\n0\n");

    let out = run_bytes(&p, input)?;
    assert!(out.contains("Invalid input. Please enter a number: "));
    assert!(out.contains("✓ SUCCESS: Customer added successfully! ID: 1"));
    assert!(out.contains("Thank you for using Cinema Management System!"));

    let customers = CustomerRepository::open(&p.customers, WriteMode::Rewrite)?;
    assert_eq!(customers.find_by_id(1).map(|c| c.last_name), Some("Lee".to_string()));
    let _ = std::fs::remove_dir_all(&p.dir);
    Ok(())
}
