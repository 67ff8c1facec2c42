pub mod config;
pub mod types;

use dimension_table::DimensionTable;
use fitting_ops::{
    builder_for, finish, purge, BuildConfig, ConstructionContext, FittingSolid, KernelBundle,
};
use fitting_types::FittingSpec;
use tracing::{info, instrument, warn};

pub use crate::config::{check_config, load_config};
pub use crate::types::{EngineError, ErrorCategory};

/// The fitting construction engine.
///
/// Validates a spec, builds it in a fresh construction context, optionally
/// solidifies it, and always leaves the kernel holding only the result.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: BuildConfig,
}

impl Engine {
    /// Create an engine with a checked config.
    pub fn new(config: BuildConfig) -> Result<Self, EngineError> {
        check_config(&config)?;
        Ok(Self { config })
    }

    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        Ok(Self {
            config: load_config(json)?,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build one fitting.
    ///
    /// Dimension problems are reported before any kernel object exists. If
    /// the kernel fails midway, everything the attempt created is deleted
    /// before the error is returned.
    #[instrument(skip_all, fields(kind = %spec.kind, convert = convert_to_solid))]
    pub fn build(
        &self,
        kb: &mut dyn KernelBundle,
        spec: &FittingSpec,
        convert_to_solid: bool,
    ) -> Result<FittingSolid, EngineError> {
        let builder = builder_for(spec)?;
        builder.validate()?;

        let mut ctx = ConstructionContext::new(kb, spec, self.config);
        let result = builder
            .construct(&mut ctx)
            .and_then(|fitting| finish(&mut ctx, fitting, convert_to_solid));
        match result {
            Ok(fitting) => {
                let deleted = purge(&mut ctx, &fitting);
                info!(
                    attempt = %ctx.attempt(),
                    handles = fitting.handles().len(),
                    deleted,
                    solidified = fitting.solidified,
                    "built fitting"
                );
                Ok(fitting)
            }
            Err(e) => {
                let deleted = ctx.purge_except(&[]);
                warn!(attempt = %ctx.attempt(), deleted, error = %e, "fitting construction failed");
                Err(e.into())
            }
        }
    }

    /// Build with the configured `convert_to_solid` default.
    pub fn build_default(
        &self,
        kb: &mut dyn KernelBundle,
        spec: &FittingSpec,
    ) -> Result<FittingSolid, EngineError> {
        self.build(kb, spec, self.config.convert_to_solid)
    }

    /// Look `name` up in `table` and build it.
    pub fn build_named(
        &self,
        kb: &mut dyn KernelBundle,
        table: &DimensionTable,
        name: &str,
        convert_to_solid: bool,
    ) -> Result<FittingSolid, EngineError> {
        let spec = table.spec(name)?;
        self.build(kb, &spec, convert_to_solid)
    }
}
