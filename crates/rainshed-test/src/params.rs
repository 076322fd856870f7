//! Regression test parameters and operations

use rainshed_core::{Sample, VoxelBuffer};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results against expectations (default)
    #[default]
    Compare,
    /// Display mode - run and report, but never fail
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "watershed")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "watershed")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        if !self.display() {
            self.failures.push(msg);
            self.success = false;
        }
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two voxel buffers for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the buffers have the same extent and samples.
    pub fn compare_voxels<T: Sample>(&mut self, v1: &VoxelBuffer<T>, v2: &VoxelBuffer<T>) -> bool {
        self.index += 1;

        if v1.extent() != v2.extent() {
            let msg = format!(
                "Failure in {}_reg: voxel comparison for index {} - extent mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        let extent = v1.extent();
        if let Some(i) = v1
            .data()
            .iter()
            .zip(v2.data())
            .position(|(a, b)| a != b)
        {
            let p = extent.point(i);
            let msg = format!(
                "Failure in {}_reg: voxel comparison for index {} - mismatch at ({}, {}, {})",
                self.test_name, self.index, p.x, p.y, p.z
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Compare two binary data arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainshed_core::Extent;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert_eq!(rp.index(), 1);
        if !rp.display() {
            assert!(!rp.compare_values(1.0, 2.0, 0.1));
            assert!(!rp.cleanup());
        }
    }

    #[test]
    fn test_compare_voxels() {
        let mut rp = RegParams::new("params_voxels");
        let e = Extent::new(2, 2, 1).unwrap();
        let a = VoxelBuffer::new_with_value(e, 3u32);
        let b = a.clone();
        assert!(rp.compare_voxels(&a, &b));
        assert!(rp.compare_strings(b"abc", b"abc"));
        assert!(rp.cleanup());
    }
}
