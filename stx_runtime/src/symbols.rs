use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One terminal of the grammar, as the generator describes it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDef {
    pub token: i32,
    pub name: String,
    /// Human-readable description. For recover tokens this is a message template in which `$m`
    /// stands for the generic syntax error text.
    #[serde(default)]
    pub full_name: String,
    /// Keyword-class token that scanners may look up by its literal text.
    #[serde(default)]
    pub reserved: bool,
}

impl TokenDef {
    pub fn new(token: i32, name: &str, full_name: &str) -> TokenDef {
        TokenDef {
            token,
            name: name.to_string(),
            full_name: full_name.to_string(),
            reserved: false,
        }
    }

    pub fn reserved(token: i32, name: &str) -> TokenDef {
        TokenDef {
            token,
            name: name.to_string(),
            full_name: name.to_string(),
            reserved: true,
        }
    }
}

/// The token definitions of a grammar. The position of a token in the catalog is its column in
/// tabular tables.
#[derive(Clone, Debug, Default)]
pub struct SymbolCatalog {
    tokens: Vec<TokenDef>,
}

impl SymbolCatalog {
    pub fn new(tokens: Vec<TokenDef>) -> SymbolCatalog {
        SymbolCatalog { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[TokenDef] {
        &self.tokens
    }

    pub fn get(&self, token: i32) -> Option<&TokenDef> {
        self.tokens.iter().find(|def| def.token == token)
    }

    /// Dense index of a token, i.e. its tabular column.
    pub fn index_of(&self, token: i32) -> Option<usize> {
        self.tokens.iter().position(|def| def.token == token)
    }

    pub fn name(&self, token: i32) -> Cow<'_, str> {
        match self.get(token) {
            Some(def) => Cow::Borrowed(def.name.as_str()),
            None => fallback_name(token),
        }
    }

    pub fn full_name(&self, token: i32) -> Cow<'_, str> {
        match self.get(token) {
            Some(def) => Cow::Borrowed(def.full_name.as_str()),
            None => fallback_name(token),
        }
    }

    /// Token id of the reserved word spelled exactly `word`.
    pub fn find_reserved_word(&self, word: &str) -> Option<i32> {
        self.tokens
            .iter()
            .find(|def| def.reserved && def.name == word)
            .map(|def| def.token)
    }

    pub fn find_reserved_word_ignore_case(&self, word: &str) -> Option<i32> {
        self.tokens
            .iter()
            .find(|def| def.reserved && def.name.eq_ignore_ascii_case(word))
            .map(|def| def.token)
    }
}

// Undeclared tokens below 256 are literal characters.
fn fallback_name(token: i32) -> Cow<'static, str> {
    if (0..256).contains(&token) {
        Cow::Owned(format!("'{}'", char::from(token as u8)))
    } else {
        Cow::Borrowed("UNKNOWN TOKEN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SymbolCatalog {
        SymbolCatalog::new(vec![
            TokenDef::new(0, "$end", "end of input"),
            TokenDef::new(257, "IDENT", "identifier"),
            TokenDef::reserved(258, "while"),
            TokenDef::reserved(259, "Begin"),
        ])
    }

    #[test]
    fn names_fall_back_to_characters() {
        let c = catalog();
        assert_eq!(c.name(257), "IDENT");
        assert_eq!(c.full_name(257), "identifier");
        assert_eq!(c.name(b';' as i32), "';'");
        assert_eq!(c.full_name(b'+' as i32), "'+'");
        assert_eq!(c.name(4000), "UNKNOWN TOKEN");
        assert_eq!(c.name(-3), "UNKNOWN TOKEN");
    }

    #[test]
    fn index_follows_declaration_order() {
        let c = catalog();
        assert_eq!(c.index_of(0), Some(0));
        assert_eq!(c.index_of(259), Some(3));
        assert_eq!(c.index_of(42), None);
    }

    #[test]
    fn reserved_words_only_match_reserved_entries() {
        let c = catalog();
        assert_eq!(c.find_reserved_word("while"), Some(258));
        assert_eq!(c.find_reserved_word("While"), None);
        assert_eq!(c.find_reserved_word_ignore_case("BEGIN"), Some(259));
        // IDENT is not reserved, even though its name matches.
        assert_eq!(c.find_reserved_word("IDENT"), None);
    }
}
