/// A named piece of generated source.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub source_text: String,
    /// Non-primitive type names the source text references, in first-reference
    /// order, deduplicated.
    pub dependency_names: Vec<String>,
}

/// Accumulates the declarations of one generation run, grouped by kind.
///
/// Each group keeps append order. A fresh accumulator per run is the whole
/// memoization story: the first declaration under a name wins, and resolving
/// the same name again returns it untouched.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    /// Interfaces.
    pub structural: Vec<Declaration>,
    /// Type aliases.
    pub aliases: Vec<Declaration>,
    /// Enum declarations.
    pub enumerations: Vec<Declaration>,
    /// Client classes.
    pub clients: Vec<Declaration>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a type declaration by name. Clients don't participate;
    /// only types memoize.
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.structural
            .iter()
            .chain(&self.aliases)
            .chain(&self.enumerations)
            .find(|declaration| declaration.name == name)
    }

    /// Number of type declarations (clients excluded).
    pub fn type_count(&self) -> usize {
        self.structural.len() + self.aliases.len() + self.enumerations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_count() == 0 && self.clients.is_empty()
    }

    /// Emission order: enumerations, structural, aliases, clients.
    pub fn in_emission_order(&self) -> impl Iterator<Item = &Declaration> {
        self.enumerations
            .iter()
            .chain(&self.structural)
            .chain(&self.aliases)
            .chain(&self.clients)
    }
}
