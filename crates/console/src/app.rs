use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use service::{CustomerService, CustomerUpdate, MovieService, MovieUpdate, TheaterService, TheaterUpdate};

use crate::error::ConsoleError;
use crate::prompt::Prompter;
use crate::tables::{id_cell, line, separator, write_customers, write_movies, write_theaters};

const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Menu-driven front-end over the three services.
///
/// Service errors are shown to the user and the loop carries on. The loop
/// ends on the exit choice or when input runs out.
pub struct CinemaConsole<R, W> {
    io: Prompter<R, W>,
    customers: CustomerService,
    movies: MovieService,
    theaters: TheaterService,
}

impl<R: BufRead, W: Write> CinemaConsole<R, W> {
    pub fn new(input: R, output: W, customers: CustomerService, movies: MovieService, theaters: TheaterService) -> Self {
        Self { io: Prompter::new(input, output), customers, movies, theaters }
    }

    /// Give back the reader and writer, e.g. to inspect a captured transcript.
    pub fn into_inner(self) -> (R, W) { self.io.into_inner() }

    /// Run until the user exits or input is exhausted.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        match self.main_loop() {
            Err(ConsoleError::Eof) => {
                info!("input closed; leaving console");
                writeln!(self.io.out())?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> Result<(), ConsoleError> {
        self.welcome()?;
        loop {
            self.main_menu()?;
            let choice: i64 = self.io.read_number()?;
            debug!(choice, "main menu");
            let outcome = match choice {
                1 => self.customer_menu(),
                2 => self.movie_menu(),
                3 => self.theater_menu(),
                4 => self.statistics(),
                0 => return self.goodbye(),
                _ => self.error(INVALID_CHOICE),
            };
            self.report(outcome)?;
        }
    }

    /// Show a service error and continue; anything else ends the loop.
    fn report(&mut self, outcome: Result<(), ConsoleError>) -> Result<(), ConsoleError> {
        match outcome {
            Err(ConsoleError::Service(e)) => {
                warn!(error = %e, "operation failed");
                self.error(e.message())
            }
            other => other,
        }
    }

    // ----- output helpers -----

    fn success(&mut self, message: &str) -> Result<(), ConsoleError> {
        writeln!(self.io.out(), "\n✓ SUCCESS: {message}")?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<(), ConsoleError> {
        writeln!(self.io.out(), "\n✗ ERROR: {message}")?;
        Ok(())
    }

    fn note(&mut self, message: &str) -> Result<(), ConsoleError> {
        writeln!(self.io.out(), "\nℹ INFO: {message}")?;
        Ok(())
    }

    fn heading(&mut self, title: &str) -> Result<(), ConsoleError> {
        writeln!(self.io.out(), "\n--- {title} ---")?;
        Ok(())
    }

    fn banner(&mut self, title: &str) -> Result<(), ConsoleError> {
        let out = self.io.out();
        writeln!(out, "\n{}", separator())?;
        writeln!(out, "{title:^80}")?;
        writeln!(out, "{}", separator())?;
        Ok(())
    }

    fn welcome(&mut self) -> Result<(), ConsoleError> {
        self.banner("WELCOME TO CINEMA MANAGEMENT SYSTEM")?;
        let out = self.io.out();
        writeln!(out, "Manage customers, movies and theaters.")?;
        writeln!(out, "{}", separator())?;
        Ok(())
    }

    fn goodbye(&mut self) -> Result<(), ConsoleError> {
        self.banner("Thank you for using Cinema Management System!")
    }

    fn main_menu(&mut self) -> Result<(), ConsoleError> {
        self.banner("CINEMA MANAGEMENT SYSTEM - MAIN MENU")?;
        let out = self.io.out();
        for item in ["1.  Customer Management", "2.  Movie Management", "3.  Theater Management", "4.  View Statistics", "0.  Exit"] {
            writeln!(out, "{item}")?;
        }
        writeln!(out, "{}", separator())?;
        write!(out, "Enter your choice: ")?;
        Ok(())
    }

    fn sub_menu(&mut self, title: &str, items: &[&str]) -> Result<i64, ConsoleError> {
        let out = self.io.out();
        writeln!(out, "\n{}", line())?;
        writeln!(out, "{title}")?;
        writeln!(out, "{}", line())?;
        for (i, item) in items.iter().enumerate() {
            writeln!(out, "{}. {item}", i + 1)?;
        }
        writeln!(out, "0. Back to Main Menu")?;
        writeln!(out, "{}", line())?;
        write!(out, "Enter your choice: ")?;
        self.io.read_number()
    }

    // ----- customers -----

    fn customer_menu(&mut self) -> Result<(), ConsoleError> {
        const ITEMS: [&str; 6] = [
            "Add New Customer",
            "View All Customers",
            "Search Customer",
            "Update Customer",
            "Delete Customer",
            "Add Loyalty Points",
        ];
        loop {
            let outcome = match self.sub_menu("CUSTOMER MANAGEMENT", &ITEMS)? {
                1 => self.add_customer(),
                2 => self.view_customers(),
                3 => self.search_customers(),
                4 => self.update_customer(),
                5 => self.delete_customer(),
                6 => self.add_loyalty_points(),
                0 => return Ok(()),
                _ => self.error(INVALID_CHOICE),
            };
            self.report(outcome)?;
        }
    }

    fn add_customer(&mut self) -> Result<(), ConsoleError> {
        self.heading("Add New Customer")?;
        let first = self.io.ask("First Name: ")?;
        let last = self.io.ask("Last Name: ")?;
        let email = self.io.ask_optional("Email (optional): ")?;
        let phone = self.io.ask_optional("Phone Number (optional): ")?;
        let customer = self.customers.create_customer(&first, &last, email, phone)?;
        self.success(&format!("Customer added successfully! ID: {}", id_cell(customer.meta.id)))?;
        self.io.wait_for_enter()
    }

    fn view_customers(&mut self) -> Result<(), ConsoleError> {
        self.heading("All Customers")?;
        let all = self.customers.get_all_customers();
        write_customers(self.io.out(), &all)?;
        self.io.wait_for_enter()
    }

    fn search_customers(&mut self) -> Result<(), ConsoleError> {
        self.heading("Search Customer")?;
        let query = self.io.ask("Enter name to search: ")?;
        let found = self.customers.search_customers(&query);
        write_customers(self.io.out(), &found)?;
        self.io.wait_for_enter()
    }

    fn update_customer(&mut self) -> Result<(), ConsoleError> {
        self.heading("Update Customer")?;
        let id: u64 = self.io.ask_number("Enter Customer ID: ")?;
        let current = self.customers.get_customer_by_id(id)?;
        writeln!(self.io.out(), "Current: {current}")?;
        let changes = CustomerUpdate {
            first_name: self.io.ask_optional("New First Name (press Enter to skip): ")?,
            last_name: self.io.ask_optional("New Last Name (press Enter to skip): ")?,
            email: self.io.ask_optional("New Email (press Enter to skip): ")?,
            phone_number: self.io.ask_optional("New Phone (press Enter to skip): ")?,
        };
        self.customers.update_customer(id, changes)?;
        self.success("Customer updated successfully!")?;
        self.io.wait_for_enter()
    }

    fn delete_customer(&mut self) -> Result<(), ConsoleError> {
        self.heading("Delete Customer")?;
        let id: u64 = self.io.ask_number("Enter Customer ID: ")?;
        let current = self.customers.get_customer_by_id(id)?;
        writeln!(self.io.out(), "Customer: {current}")?;
        if self.io.confirm("Are you sure you want to delete this customer?")? {
            self.customers.delete_customer(id)?;
            self.success("Customer deleted successfully!")?;
        } else {
            self.note("Deletion cancelled.")?;
        }
        self.io.wait_for_enter()
    }

    fn add_loyalty_points(&mut self) -> Result<(), ConsoleError> {
        self.heading("Add Loyalty Points")?;
        let id: u64 = self.io.ask_number("Enter Customer ID: ")?;
        let points: i64 = self.io.ask_number("Enter points to add: ")?;
        let customer = self.customers.add_loyalty_points(id, points)?;
        self.success(&format!("Added {points} points. Total: {}", customer.loyalty_points()))?;
        self.io.wait_for_enter()
    }

    // ----- movies -----

    fn movie_menu(&mut self) -> Result<(), ConsoleError> {
        const ITEMS: [&str; 6] = [
            "Add New Movie",
            "View All Movies",
            "Search Movie",
            "Update Movie",
            "Delete Movie",
            "Update Movie Rating",
        ];
        loop {
            let outcome = match self.sub_menu("MOVIE MANAGEMENT", &ITEMS)? {
                1 => self.add_movie(),
                2 => self.view_movies(),
                3 => self.search_movies(),
                4 => self.update_movie(),
                5 => self.delete_movie(),
                6 => self.update_rating(),
                0 => return Ok(()),
                _ => self.error(INVALID_CHOICE),
            };
            self.report(outcome)?;
        }
    }

    fn add_movie(&mut self) -> Result<(), ConsoleError> {
        self.heading("Add New Movie")?;
        let title = self.io.ask("Title: ")?;
        let genre = self.io.ask("Genre: ")?;
        let duration: u32 = self.io.ask_number("Duration (minutes): ")?;
        let director = self.io.ask_optional("Director: ")?;
        let language = self.io.ask_optional("Language: ")?;
        let movie = self.movies.create_movie(&title, &genre, duration, director, language)?;
        self.success(&format!("Movie added successfully! ID: {}", id_cell(movie.meta.id)))?;
        self.io.wait_for_enter()
    }

    fn view_movies(&mut self) -> Result<(), ConsoleError> {
        self.heading("All Movies")?;
        let all = self.movies.get_all_movies();
        write_movies(self.io.out(), &all)?;
        self.io.wait_for_enter()
    }

    fn search_movies(&mut self) -> Result<(), ConsoleError> {
        self.heading("Search Movie")?;
        let query = self.io.ask("Enter title to search: ")?;
        let found = self.movies.search_movies(&query);
        write_movies(self.io.out(), &found)?;
        self.io.wait_for_enter()
    }

    fn update_movie(&mut self) -> Result<(), ConsoleError> {
        self.heading("Update Movie")?;
        let id: u64 = self.io.ask_number("Enter Movie ID: ")?;
        let current = self.movies.get_movie_by_id(id)?;
        writeln!(self.io.out(), "Current: {current}")?;
        let title = self.io.ask_optional("New Title (press Enter to skip): ")?;
        let genre = self.io.ask_optional("New Genre (press Enter to skip): ")?;
        let duration: u32 = self.io.ask_number("New Duration in minutes (0 to skip): ")?;
        let changes = MovieUpdate {
            title,
            genre,
            duration_minutes: (duration != 0).then_some(duration),
            director: self.io.ask_optional("New Director (press Enter to skip): ")?,
            language: self.io.ask_optional("New Language (press Enter to skip): ")?,
            description: self.io.ask_optional("New Description (press Enter to skip): ")?,
            rating: None,
        };
        self.movies.update_movie(id, changes)?;
        self.success("Movie updated successfully!")?;
        self.io.wait_for_enter()
    }

    fn delete_movie(&mut self) -> Result<(), ConsoleError> {
        self.heading("Delete Movie")?;
        let id: u64 = self.io.ask_number("Enter Movie ID: ")?;
        let current = self.movies.get_movie_by_id(id)?;
        writeln!(self.io.out(), "Movie: {current}")?;
        if self.io.confirm("Are you sure you want to delete this movie?")? {
            self.movies.delete_movie(id)?;
            self.success("Movie deleted successfully!")?;
        } else {
            self.note("Deletion cancelled.")?;
        }
        self.io.wait_for_enter()
    }

    fn update_rating(&mut self) -> Result<(), ConsoleError> {
        self.heading("Update Movie Rating")?;
        let id: u64 = self.io.ask_number("Enter Movie ID: ")?;
        let rating: f64 = self.io.ask_number("Enter new rating (0.0 - 10.0): ")?;
        let movie = self.movies.update_rating(id, rating)?;
        self.success(&format!("Rating updated to {rating:.1} for: {}", movie.title))?;
        self.io.wait_for_enter()
    }

    // ----- theaters -----

    fn theater_menu(&mut self) -> Result<(), ConsoleError> {
        const ITEMS: [&str; 7] = [
            "Add New Theater",
            "View All Theaters",
            "Search Theater",
            "Update Theater",
            "Delete Theater",
            "Assign Movie to Theater",
            "Remove Movie from Theater",
        ];
        loop {
            let outcome = match self.sub_menu("THEATER MANAGEMENT", &ITEMS)? {
                1 => self.add_theater(),
                2 => self.view_theaters(),
                3 => self.search_theaters(),
                4 => self.update_theater(),
                5 => self.delete_theater(),
                6 => self.assign_movie(),
                7 => self.unassign_movie(),
                0 => return Ok(()),
                _ => self.error(INVALID_CHOICE),
            };
            self.report(outcome)?;
        }
    }

    fn add_theater(&mut self) -> Result<(), ConsoleError> {
        self.heading("Add New Theater")?;
        let name = self.io.ask("Name: ")?;
        let capacity: u32 = self.io.ask_number("Capacity: ")?;
        let screen_type = self.io.ask("Screen Type (Standard/IMAX/3D/4DX): ")?;
        let theater = self.theaters.create_theater(&name, capacity, &screen_type)?;
        self.success(&format!("Theater added successfully! ID: {}", id_cell(theater.meta.id)))?;
        self.io.wait_for_enter()
    }

    fn view_theaters(&mut self) -> Result<(), ConsoleError> {
        self.heading("All Theaters")?;
        let all = self.theaters.get_all_theaters();
        write_theaters(self.io.out(), &all)?;
        self.io.wait_for_enter()
    }

    fn search_theaters(&mut self) -> Result<(), ConsoleError> {
        self.heading("Search Theater")?;
        let query = self.io.ask("Enter name to search: ")?;
        let found = self.theaters.search_theaters(&query);
        write_theaters(self.io.out(), &found)?;
        self.io.wait_for_enter()
    }

    fn update_theater(&mut self) -> Result<(), ConsoleError> {
        self.heading("Update Theater")?;
        let id: u64 = self.io.ask_number("Enter Theater ID: ")?;
        let current = self.theaters.get_theater_by_id(id)?;
        writeln!(self.io.out(), "Current: {current}")?;
        let name = self.io.ask_optional("New Name (press Enter to skip): ")?;
        let capacity: u32 = self.io.ask_number("New Capacity (0 to skip): ")?;
        let screen_type = self.io.ask_optional("New Screen Type (press Enter to skip): ")?;
        let access = self.io.ask_optional("Wheelchair access? (y/n, press Enter to skip): ")?;
        let changes = TheaterUpdate {
            name,
            capacity: (capacity != 0).then_some(capacity),
            screen_type,
            has_wheelchair_access: access.map(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")),
        };
        self.theaters.update_theater(id, changes)?;
        self.success("Theater updated successfully!")?;
        self.io.wait_for_enter()
    }

    fn delete_theater(&mut self) -> Result<(), ConsoleError> {
        self.heading("Delete Theater")?;
        let id: u64 = self.io.ask_number("Enter Theater ID: ")?;
        let current = self.theaters.get_theater_by_id(id)?;
        writeln!(self.io.out(), "Theater: {current}")?;
        if self.io.confirm("Are you sure you want to delete this theater?")? {
            self.theaters.delete_theater(id)?;
            self.success("Theater deleted successfully!")?;
        } else {
            self.note("Deletion cancelled.")?;
        }
        self.io.wait_for_enter()
    }

    fn assign_movie(&mut self) -> Result<(), ConsoleError> {
        self.heading("Assign Movie to Theater")?;
        let theater_id: u64 = self.io.ask_number("Enter Theater ID: ")?;
        let movie_id: u64 = self.io.ask_number("Enter Movie ID: ")?;
        self.theaters.add_movie_to_theater(theater_id, movie_id)?;
        self.success("Movie assigned to theater successfully!")?;
        self.io.wait_for_enter()
    }

    fn unassign_movie(&mut self) -> Result<(), ConsoleError> {
        self.heading("Remove Movie from Theater")?;
        let theater_id: u64 = self.io.ask_number("Enter Theater ID: ")?;
        let movie_id: u64 = self.io.ask_number("Enter Movie ID: ")?;
        self.theaters.remove_movie_from_theater(theater_id, movie_id)?;
        self.success("Movie removed from theater successfully!")?;
        self.io.wait_for_enter()
    }

    // ----- statistics -----

    fn statistics(&mut self) -> Result<(), ConsoleError> {
        let (customers, movies, theaters) = (
            self.customers.get_customer_count(),
            self.movies.get_movie_count(),
            self.theaters.get_theater_count(),
        );
        self.banner("SYSTEM STATISTICS")?;
        let out = self.io.out();
        writeln!(out, "Total Customers: {customers}")?;
        writeln!(out, "Total Movies:    {movies}")?;
        writeln!(out, "Total Theaters:  {theaters}")?;
        writeln!(out, "{}", separator())?;
        self.io.wait_for_enter()
    }
}

