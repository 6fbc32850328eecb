use crate::models::TemplateDefinition;
use crate::services::RewriteError;
use indexmap::{IndexMap, IndexSet};

/// Read-only lookups over the document's `templates`.
#[derive(Debug, Clone, Copy)]
pub struct TemplateCatalog<'a> {
    templates: &'a IndexMap<String, TemplateDefinition>,
}

impl<'a> TemplateCatalog<'a> {
    pub fn new(templates: &'a IndexMap<String, TemplateDefinition>) -> Self {
        Self { templates }
    }

    /// True only if `name` exists and carries the whitelist flag.
    pub fn is_whitelist(&self, name: &str) -> bool {
        self.templates
            .get(name)
            .is_some_and(|template| template.is_whitelist)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Member identifiers of `name`, deduplicated, in list order.
    pub fn members(&self, name: &str) -> Result<IndexSet<String>, RewriteError> {
        self.templates
            .get(name)
            .map(|template| template.app_list.iter().cloned().collect())
            .ok_or_else(|| RewriteError::UnknownTemplate(name.to_string()))
    }
}
