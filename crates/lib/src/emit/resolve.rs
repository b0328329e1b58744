//! Entry-to-template resolution.

use tracing::trace;

use crate::compilation::{Compilation, Entrypoint};
use crate::graph::{Module, walk};
use crate::registry::{TemplateRecord, TemplateRegistry};

/// An entry point paired with the module whose template it renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Association<'c> {
  pub entry: &'c Entrypoint,
  pub module: &'c Module,
  pub record: TemplateRecord,
}

/// Find the template module of every entry point.
///
/// For each entry point, and each of its chunks that has an entry module, the
/// entry module's dependencies are walked depth-first and the first module
/// with a template record is taken. The rest of that branch is not searched.
/// Branches without any record contribute nothing.
pub fn find_associations<'c>(
  compilation: &'c Compilation,
  registry: &'c TemplateRegistry,
) -> impl Iterator<Item = Association<'c>> + 'c {
  compilation.entrypoints.iter().flat_map(move |entry| {
    entry.entry_modules().filter_map(move |entry_module| {
      let found = walk(&compilation.graph, entry_module)
        .find_map(|module| registry.template_record(&module.id).map(|record| (module, record)));

      match found {
        Some((module, record)) => Some(Association { entry, module, record }),
        None => {
          trace!(entry = %entry.name, module = %entry_module, "no template in entry branch");
          None
        }
      }
    })
  })
}
