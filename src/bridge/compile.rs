use crate::manifest::{self, DEFAULT_ENTRY, Manifest};
use crate::protocol::{CompileCommand, ModuleSet, module_set};
use crate::sandbox::{Files, SandboxDescription};
use crate::template::{TemplateRegistry, default_entry};

/// A sandbox description normalized for one compile cycle.
///
/// Preparing a request needs no host or frame, so the manifest and template
/// a description produces can be inspected on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// File tree with the manifest injected when it was missing
    pub files: Files,
    /// Manifest active for this cycle
    pub manifest: Manifest,
    pub template: String,
    pub modules: ModuleSet,
}

impl CompileRequest {
    pub fn prepare(description: &SandboxDescription, templates: &TemplateRegistry) -> Self {
        let fallback_entry = description
            .template()
            .map(default_entry)
            .unwrap_or(DEFAULT_ENTRY);
        let dependencies = description.dependencies();
        let entry = description.entry();

        let files = manifest::synthesize(description.files(), dependencies, entry, fallback_entry);
        let manifest = manifest::active_manifest(&files, dependencies, entry, fallback_entry);
        let modules = module_set(&files);
        let template = templates.resolve(description.template(), &manifest, &modules);

        Self {
            files,
            manifest,
            template,
            modules,
        }
    }

    pub fn into_command(self, skip_eval: bool) -> CompileCommand {
        CompileCommand::new(self.modules, self.template, skip_eval)
    }
}
