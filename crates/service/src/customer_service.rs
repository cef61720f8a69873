use tracing::{debug, info, instrument};

use models::Customer;

use crate::domain::{non_blank, patch_optional, CustomerUpdate};
use crate::errors::ServiceError;
use crate::file::CustomerRepository;
use crate::repository::Repository;

/// Customer business rules over a [`CustomerRepository`].
///
/// Emails are unique across customers, compared without regard to case.
#[derive(Debug)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self { Self { repo } }

    /// Create and persist a customer. Blank email or phone values are stored as absent.
    #[instrument(skip(self, phone_number))]
    pub fn create_customer(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Customer, ServiceError> {
        let email = non_blank(email);
        if let Some(addr) = email.as_deref() {
            self.ensure_email_free(addr, None)?;
        }
        let saved = self.repo.save(Customer::new(first_name, last_name, email, non_blank(phone_number)))?;
        info!(id = ?saved.meta.id, "customer_created");
        Ok(saved)
    }

    pub fn get_customer_by_id(&self, id: u64) -> Result<Customer, ServiceError> {
        self.repo.find_by_id(id).ok_or_else(|| ServiceError::not_found("Customer", id))
    }

    pub fn get_all_customers(&self) -> Vec<Customer> { self.repo.find_all() }

    /// Apply the fields present in `changes` and write the customer back.
    #[instrument(skip(self, changes))]
    pub fn update_customer(&mut self, id: u64, changes: CustomerUpdate) -> Result<Customer, ServiceError> {
        let mut customer = self.get_customer_by_id(id)?;
        if let Some(addr) = changes.email.as_deref().filter(|e| !e.trim().is_empty()) {
            self.ensure_email_free(addr, Some(id))?;
        }
        if let Some(v) = changes.first_name { customer.first_name = v; }
        if let Some(v) = changes.last_name { customer.last_name = v; }
        patch_optional(&mut customer.email, changes.email);
        patch_optional(&mut customer.phone_number, changes.phone_number);
        let updated = self.repo.update(customer)?;
        info!(id, "customer_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete_customer(&mut self, id: u64) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id)? {
            return Err(ServiceError::not_found("Customer", id));
        }
        info!(id, "customer_deleted");
        Ok(())
    }

    /// Customers whose first or last name contains `query`.
    pub fn search_customers(&self, query: &str) -> Vec<Customer> { self.repo.search_by_name(query) }

    /// Add loyalty points. Non-positive deltas leave the balance alone, but
    /// the record is still written back.
    #[instrument(skip(self))]
    pub fn add_loyalty_points(&mut self, id: u64, points: i64) -> Result<Customer, ServiceError> {
        let mut customer = self.get_customer_by_id(id)?;
        if !customer.add_loyalty_points(points) {
            debug!(id, points, "loyalty delta ignored");
        }
        self.repo.update(customer)
    }

    pub fn get_customer_count(&self) -> usize { self.repo.count() }

    fn ensure_email_free(&self, email: &str, owner: Option<u64>) -> Result<(), ServiceError> {
        match self.repo.find_by_email(email) {
            Some(existing) if existing.meta.id != owner => {
                Err(ServiceError::Validation(format!("Customer with email {email} already exists")))
            }
            _ => Ok(()),
        }
    }
}
