//! Defines the `Sampler` trait - an object that can randomly sample from a `MarkovNet` - and
//! the `SampleTable` that records the output of a sampling run.

use util::Result;
use variable::Assignment;

use indexmap::IndexMap;

pub mod gibbs;

pub use self::gibbs::{GibbsSampler, InitialSample};

pub trait Sampler {

    /// Draw the next sample from the associated `MarkovNet`.
    fn sample(&mut self) -> Result<Assignment>;

}


/// A table of recorded samples - one named column per `Variable`, one row per sample.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleTable {

    /// The columns of the table, keyed by `Variable` name
    columns: IndexMap<String, Vec<usize>>

}


impl SampleTable {

    /// Construct an empty `SampleTable` with one column per name, in the given order.
    pub fn new(names: Vec<String>) -> SampleTable {
        let columns = names.into_iter().map(|n| (n, Vec::new())).collect();
        SampleTable { columns }
    }


    /// The number of recorded rows.
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, |c| c.len())
    }


    /// Check whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// The number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }


    /// The column names, in column order.
    pub fn names(&self) -> Vec<&String> {
        self.columns.keys().collect()
    }


    /// The recorded values of the named column.
    pub fn column(&self, name: &str) -> Option<&Vec<usize>> {
        self.columns.get(name)
    }


    /// Append a row of values, one per column, in column order.
    pub fn push_row(&mut self, row: &[usize]) {
        assert_eq!(self.columns.len(), row.len());

        for (col, &val) in self.columns.values_mut().zip(row.iter()) {
            col.push(val);
        }
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn sample_table() {
        let names = vec![String::from("A"), String::from("B")];
        let mut table = SampleTable::new(names);

        assert!(table.is_empty());
        assert_eq!(2, table.num_columns());
        assert_eq!(vec!["A", "B"], table.names());

        table.push_row(&[0, 1]);
        table.push_row(&[1, 1]);

        assert_eq!(2, table.len());
        assert!(! table.is_empty());
        assert_eq!(Some(&vec![0, 1]), table.column("A"));
        assert_eq!(Some(&vec![1, 1]), table.column("B"));
        assert!(table.column("C").is_none());
    }
}
