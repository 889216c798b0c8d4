use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use crate::{MlErr, Result, dataset::Dataset, record::CustomerRecord};

/// The regions a synthetic customer can belong to.
pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

const AGE: (i64, i64) = (18, 65);
const INCOME: (i64, i64) = (30_000, 150_000);
const LOYALTY: (i64, i64) = (1, 10);
const VISITS: (i64, i64) = (1, 20);
const NOISE_STD_DEV: f64 = 20.0;

/// A generated customer together with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticCustomer {
    pub customer_id: usize,
    pub record: CustomerRecord,
    pub aov: f64,
}

/// The noiseless average order value of a customer.
pub fn expected_order_value(record: &CustomerRecord) -> f64 {
    record.income * 0.001 + record.loyalty_score * 10.0 + record.visits_per_month as f64 * 5.0
}

/// Seeded generator of synthetic customers.
pub struct CustomerGenerator {
    rng: StdRng,
    noise: Normal<f64>,
}

impl CustomerGenerator {
    /// Creates a new `CustomerGenerator`.
    ///
    /// # Arguments
    /// * `seed` - The seed of the underlying random number generator.
    pub fn new(seed: u64) -> Result<Self> {
        let noise = Normal::new(0.0, NOISE_STD_DEV).map_err(|e| MlErr::InvalidParameter {
            name: "noise_std_dev",
            reason: e.to_string(),
        })?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            noise,
        })
    }

    /// Generates `n` customers.
    ///
    /// Each column is sampled in full before the next one, the label noise is sampled last.
    ///
    /// # Arguments
    /// * `n` - The amount of customers to generate.
    ///
    /// # Returns
    /// The generated customers, their ids being `0..n`.
    pub fn generate(&mut self, n: usize) -> Vec<SyntheticCustomer> {
        let ages = self.column(n, AGE);
        let incomes = self.column(n, INCOME);
        let loyalties = self.column(n, LOYALTY);
        let regions: Vec<_> = (0..n)
            .map(|_| REGIONS[self.rng.random_range(0..REGIONS.len())])
            .collect();
        let visits = self.column(n, VISITS);
        let noise: Vec<f64> = (0..n).map(|_| self.noise.sample(&mut self.rng)).collect();

        (0..n)
            .map(|i| {
                let record = CustomerRecord {
                    age: ages[i],
                    income: incomes[i] as f64,
                    loyalty_score: loyalties[i] as f64,
                    region: regions[i].to_string(),
                    visits_per_month: visits[i],
                };
                let aov = expected_order_value(&record) + noise[i];

                SyntheticCustomer {
                    customer_id: i,
                    record,
                    aov,
                }
            })
            .collect()
    }

    /// Generates `n` customers as a labelled dataset, dropping their ids.
    pub fn dataset(&mut self, n: usize) -> Dataset {
        let (records, targets) = self
            .generate(n)
            .into_iter()
            .map(|customer| (customer.record, customer.aov))
            .unzip();

        Dataset::new(records, targets)
    }

    fn column(&mut self, n: usize, (low, high): (i64, i64)) -> Vec<i64> {
        (0..n).map(|_| self.rng.random_range(low..high)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_stay_within_bounds() {
        let customers = CustomerGenerator::new(7).unwrap().generate(500);

        assert_eq!(customers.len(), 500);
        for (i, c) in customers.iter().enumerate() {
            assert_eq!(c.customer_id, i);
            assert!((AGE.0..AGE.1).contains(&c.record.age));
            assert!((30_000.0..150_000.0).contains(&c.record.income));
            assert!((1.0..10.0).contains(&c.record.loyalty_score));
            assert!((VISITS.0..VISITS.1).contains(&c.record.visits_per_month));
            assert!(REGIONS.contains(&c.record.region.as_str()));
        }
    }

    #[test]
    fn same_seed_same_customers() {
        let a = CustomerGenerator::new(42).unwrap().generate(100);
        let b = CustomerGenerator::new(42).unwrap().generate(100);
        assert_eq!(a, b);
    }

    #[test]
    fn noise_is_centered_on_the_formula() {
        let customers = CustomerGenerator::new(42).unwrap().generate(5000);
        let residuals: Vec<f64> = customers
            .iter()
            .map(|c| c.aov - expected_order_value(&c.record))
            .collect();

        let mean = residuals.iter().sum::<f64>() / residuals.len() as f64;
        let var = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / residuals.len() as f64;

        assert!(mean.abs() < 1.5, "mean {mean}");
        assert!((var.sqrt() - NOISE_STD_DEV).abs() < 1.5, "std {}", var.sqrt());
    }

    #[test]
    fn expected_value_of_reference_customer() {
        let record = CustomerRecord {
            age: 32,
            income: 72000.0,
            loyalty_score: 7.0,
            region: "North".into(),
            visits_per_month: 5,
        };

        assert!((expected_order_value(&record) - 167.0).abs() < 1e-9);
    }
}
