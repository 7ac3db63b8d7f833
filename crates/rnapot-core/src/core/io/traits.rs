use crate::core::models::atom::AtomRecord;
use std::error::Error;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Defines the interface for reading representative atoms from a structure file format.
///
/// Implementors parse the first structural model only and emit one [`AtomRecord`] per
/// canonical nucleotide residue that carries the representative atom, in file order.
/// Residues of any other type are skipped silently; they are not an error.
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads representative atoms from any byte source.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content cannot be parsed in this format.
    fn read_from(reader: impl Read) -> Result<Vec<AtomRecord>, Self::Error>;

    /// Reads representative atoms from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AtomRecord>, Self::Error> {
        let file = File::open(path)?;
        Self::read_from(file)
    }
}
