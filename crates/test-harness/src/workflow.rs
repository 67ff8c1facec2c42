//! FittingHarness: fluent API for building and probing fittings in tests.
//!
//! Goes through `fitting_engine::Engine`, the same path callers use. Fittings
//! are addressed by test-chosen names instead of kernel handles.

use std::collections::HashMap;

use dimension_table::DimensionTable;
use fitting_engine::{Engine, EngineError};
use fitting_ops::{BuildConfig, FittingSolid, KernelBundle};
use fitting_types::{FittingKind, FittingSpec};
use geom_kernel::{Aabb, KernelIntrospect, MockKernel, TruckKernel};

use crate::assertions::{assert_all_pass, assert_verdict};
use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};

/// A fluent builder for constructing and verifying fittings in tests.
pub struct FittingHarness {
    kernel: Box<dyn KernelBundle>,
    engine: Engine,
    named: HashMap<String, FittingSolid>,
    history: Vec<(String, String)>,
}

impl FittingHarness {
    /// Create a harness on MockKernel (deterministic, exact point queries).
    pub fn mock() -> Self {
        Self::with_kernel(Box::new(MockKernel::new()))
    }

    /// Create a harness on TruckKernel (real B-rep geometry).
    pub fn truck() -> Self {
        Self::with_kernel(Box::new(TruckKernel::new()))
    }

    fn with_kernel(kernel: Box<dyn KernelBundle>) -> Self {
        Self {
            kernel,
            engine: Engine::default(),
            named: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Replace the engine config.
    pub fn with_config(mut self, config: BuildConfig) -> Result<Self, HarnessError> {
        self.engine = Engine::new(config)?;
        Ok(self)
    }

    // ── Building ────────────────────────────────────────────────────────

    /// Build `spec` as a solid and remember it under `name`.
    pub fn build(&mut self, name: &str, spec: &FittingSpec) -> Result<&FittingSolid, HarnessError> {
        self.check_name_available(name)?;
        let fitting = self.engine.build(self.kernel.as_mut(), spec, true)?;
        Ok(self.remember(name, format!("build {}", spec.kind), fitting))
    }

    /// Build the built-in default dimensions of `kind`.
    pub fn build_kind(&mut self, name: &str, kind: FittingKind) -> Result<&FittingSolid, HarnessError> {
        self.build(name, &FittingSpec::with_defaults(kind))
    }

    /// Build `part` from `table`.
    pub fn build_from_table(
        &mut self,
        name: &str,
        table: &DimensionTable,
        part: &str,
    ) -> Result<&FittingSolid, HarnessError> {
        self.check_name_available(name)?;
        let fitting = self
            .engine
            .build_named(self.kernel.as_mut(), table, part, true)?;
        Ok(self.remember(name, format!("build {} {}", table.kind(), part), fitting))
    }

    /// Run the engine without remembering the result, for failure tests.
    pub fn try_build(
        &mut self,
        spec: &FittingSpec,
        convert_to_solid: bool,
    ) -> Result<FittingSolid, EngineError> {
        self.history
            .push(("<unnamed>".to_string(), format!("try build {}", spec.kind)));
        self.engine.build(self.kernel.as_mut(), spec, convert_to_solid)
    }

    fn remember(&mut self, name: &str, action: String, fitting: FittingSolid) -> &FittingSolid {
        self.history.push((name.to_string(), action));
        self.named.entry(name.to_string()).or_insert(fitting)
    }

    fn check_name_available(&self, name: &str) -> Result<(), HarnessError> {
        if self.named.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn fitting(&self, name: &str) -> Result<&FittingSolid, HarnessError> {
        self.named
            .get(name)
            .ok_or_else(|| HarnessError::FittingNotFound {
                name: name.to_string(),
            })
    }

    pub fn introspect(&self) -> &dyn KernelIntrospect {
        self.kernel.as_introspect()
    }

    pub fn shape_count(&self) -> usize {
        self.introspect().shape_count()
    }

    /// Actions performed so far, as `(name, action)` pairs.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    /// Whether `p` is material of any body of the fitting.
    pub fn contains_point(&self, name: &str, p: [f64; 3]) -> Result<bool, HarnessError> {
        for h in self.fitting(name)?.handles() {
            if self.introspect().contains_point(h, p)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn bounding_box(&self, name: &str) -> Result<Aabb, HarnessError> {
        let fitting = self.fitting(name)?;
        oracle::combined_bounds(self.introspect(), fitting.handles()).ok_or_else(|| {
            HarnessError::AssertionFailed {
                detail: format!("{} has no computed bounds", name),
            }
        })
    }

    // ── Assertions ──────────────────────────────────────────────────────

    pub fn assert_inside(&self, name: &str, p: [f64; 3]) -> Result<(), HarnessError> {
        let fitting = self.fitting(name)?;
        let verdict = oracle::check_point_inside(self.introspect(), fitting.handles(), p);
        assert_verdict(&verdict, name)
    }

    pub fn assert_outside(&self, name: &str, p: [f64; 3]) -> Result<(), HarnessError> {
        let fitting = self.fitting(name)?;
        let verdict = oracle::check_point_outside(self.introspect(), fitting.handles(), p);
        assert_verdict(&verdict, name)
    }

    /// Tube wall from `inner` to `outer` around `axis` through `center`.
    pub fn assert_annulus(
        &self,
        name: &str,
        center: [f64; 3],
        axis: [f64; 3],
        inner: f64,
        outer: f64,
    ) -> Result<(), HarnessError> {
        let fitting = self.fitting(name)?;
        let verdict =
            oracle::check_annulus(self.introspect(), fitting.handles(), center, axis, inner, outer);
        assert_verdict(&verdict, name)
    }

    pub fn assert_bounding_box(
        &self,
        name: &str,
        expected: Aabb,
        tol: f64,
    ) -> Result<(), HarnessError> {
        let fitting = self.fitting(name)?;
        let verdict =
            oracle::check_bounding_box(self.introspect(), fitting.handles(), &expected, tol);
        assert_verdict(&verdict, name)
    }

    /// Structural checks on every fitting built so far.
    pub fn verdicts(&self) -> Vec<OracleVerdict> {
        let introspect = self.introspect();
        let mut names: Vec<&String> = self.named.keys().collect();
        names.sort();
        let mut out: Vec<OracleVerdict> = names
            .iter()
            .map(|n| oracle::check_solidified(introspect, &self.named[*n]))
            .collect();
        let all: Vec<&FittingSolid> = self.named.values().collect();
        out.push(oracle::check_no_leftovers(introspect, &all));
        out
    }

    pub fn assert_clean(&self) -> Result<(), HarnessError> {
        assert_all_pass(&self.verdicts(), "clean kernel")
    }
}
