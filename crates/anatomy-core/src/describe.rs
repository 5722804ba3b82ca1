//! Educational descriptions keyed by part display name

use std::collections::HashMap;

/// Text shown for any part without a dedicated description
pub const FALLBACK_DESCRIPTION: &str =
    "Descripción educativa breve. Puedes editar este texto para agregar más información.";

const BUILTIN: &[(&str, &str)] = &[
    (
        "Corazón",
        "Órgano que bombea la sangre por todo el cuerpo. Explica latidos, oxigenación y función básica.",
    ),
    (
        "Pulmón izquierdo",
        "Órgano encargado del intercambio de gases (oxígeno y dióxido de carbono).",
    ),
    (
        "Pulmón derecho",
        "Órgano encargado del intercambio de gases (oxígeno y dióxido de carbono).",
    ),
    (
        "Hígado",
        "Órgano que procesa nutrientes, desintoxica y produce bilis.",
    ),
    ("Cráneo (hueso)", "Estructura ósea que protege el cerebro."),
    (
        "Cerebro",
        "Centro del sistema nervioso; controla funciones, pensamiento y movimiento.",
    ),
    (
        "Pelvis",
        "Estructura ósea que soporta la columna y conecta las piernas al torso.",
    ),
    (
        "Músculos (torso)",
        "Conjunto de músculos que permiten el movimiento y protegen órganos internos.",
    ),
];

/// Read-only name -> description map, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionIndex {
    entries: HashMap<String, String>,
}

impl Default for DescriptionIndex {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DescriptionIndex {
    /// The descriptions that ship with the viewer
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string()))
                .collect(),
        }
    }

    /// Built-in descriptions with extra or replacement entries merged on top
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut index = Self::builtin();
        for (name, text) in overrides {
            index.entries.insert(name.into(), text.into());
        }
        index
    }

    /// Description for an exact name match, or the fallback text
    pub fn describe(&self, name: &str) -> &str {
        self.entries
            .get(name)
            .map(String::as_str)
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let index = DescriptionIndex::builtin();
        assert_eq!(index.len(), 8);
        assert_eq!(
            index.describe("Hígado"),
            "Órgano que procesa nutrientes, desintoxica y produce bilis."
        );
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let index = DescriptionIndex::builtin();
        assert_eq!(index.describe("Vertebra 3"), FALLBACK_DESCRIPTION);
        // Exact match only
        assert_eq!(index.describe("corazón"), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let index = DescriptionIndex::with_overrides([
            ("Hígado", "Glándula más grande del cuerpo."),
            ("Ojo izquierdo", "Órgano de la visión."),
        ]);
        assert_eq!(index.describe("Hígado"), "Glándula más grande del cuerpo.");
        assert_eq!(index.describe("Ojo izquierdo"), "Órgano de la visión.");
        assert!(index.contains("Corazón"));
        assert_eq!(index.len(), 9);
    }
}
