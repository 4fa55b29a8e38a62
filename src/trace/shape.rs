//! Line Shape Classification
//!
//! Describes why a matched line matters by looking at its syntactic shape.
//! Rules are evaluated in order and the first match wins; a line no rule
//! matches is a plain usage.
//!
//! @module trace/shape

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// SHAPES
// =============================================================================

/// Syntactic shape of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    Import,
    Require,
    Instantiation,
    TypeDefinition,
    FunctionDefinition,
    AsyncCall,
    MethodCall,
    Export,
    Assignment,
    Usage,
}

/// A pattern and the sentences produced when it matches
///
/// Templates may use `{keyword}` (the matched question term) and `{name}`
/// (the first capture group that participated, or the keyword).
struct ShapeRule {
    shape: LineShape,
    regex: Regex,
    explanation: &'static str,
    why_relevant: &'static str,
}

impl ShapeRule {
    fn new(
        shape: LineShape,
        pattern: &str,
        explanation: &'static str,
        why_relevant: &'static str,
    ) -> Self {
        Self {
            shape,
            regex: Regex::new(pattern).unwrap(),
            explanation,
            why_relevant,
        }
    }
}

// =============================================================================
// RULE TABLE
// =============================================================================

static SHAPE_RULES: Lazy<Vec<ShapeRule>> = Lazy::new(|| {
    vec![
        ShapeRule::new(
            LineShape::Import,
            r#"^(?:import\b.*?\bfrom\s*['"]([^'"]+)['"]|import\s+['"]([^'"]+)['"]|from\s+([\w.]+)\s+import\b|import\s+([\w.]+)|use\s+([\w:]+)|#include\s*[<"]([^>"]+)[>"]|using\s+([\w.]+)\s*;|import\b)"#,
            "Imports `{name}`, bringing the {keyword} logic into this file.",
            "This is where the {keyword} code enters this module, so it marks the next hop in the path.",
        ),
        ShapeRule::new(
            LineShape::Require,
            r#"\b(?:require|import)\s*\(\s*['"`]([^'"`]+)['"`]"#,
            "Loads `{name}` at runtime, pulling in the {keyword} implementation on demand.",
            "A runtime load ties this file to the {keyword} module it depends on.",
        ),
        ShapeRule::new(
            LineShape::Instantiation,
            r"\bnew\s+([A-Za-z_$][\w$.]*)|\b([A-Z]\w*)::(?:new|default|builder)\s*\(",
            "Creates a new `{name}` instance that carries the {keyword} behaviour forward.",
            "Constructing this object is where the {keyword} component comes to life.",
        ),
        ShapeRule::new(
            LineShape::TypeDefinition,
            r"^(?:export\s+)?(?:default\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:abstract\s+|data\s+|sealed\s+)?(?:class|interface|struct|enum|trait|type|protocol)\s+([A-Za-z_$][\w$]*)",
            "Defines the `{name}` type, which shapes how {keyword} data is modelled.",
            "The structure of {keyword} is declared here, so later steps operate on it.",
        ),
        ShapeRule::new(
            LineShape::FunctionDefinition,
            r"^(?:export\s+)?(?:default\s+)?(?:pub(?:\([^)]*\))?\s+)?(?:static\s+)?(?:async\s+)?(?:function\s*\*?\s*([A-Za-z_$][\w$]*)|fn\s+(\w+)|def\s+(\w+)|func\s+(?:\([^)]*\)\s*)?(\w+))",
            "Defines `{name}`, the function that implements this part of {keyword}.",
            "The body of this function is where the {keyword} logic actually runs.",
        ),
        ShapeRule::new(
            LineShape::FunctionDefinition,
            r"^(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*(?::[^=]+)?=>|[A-Za-z_$][\w$]*\s*=>)",
            "Defines `{name}` as a closure that implements this part of {keyword}.",
            "The body of this closure is where the {keyword} logic actually runs.",
        ),
        ShapeRule::new(
            LineShape::AsyncCall,
            r"\bawait\s+([\w$.]+)|\.then\s*\(|\)\s*\.\s*[A-Za-z_$][\w$]*\s*\(",
            "Waits on `{name}`, an asynchronous step in the {keyword} flow.",
            "Execution pauses here until the {keyword} work completes, so ordering matters at this point.",
        ),
        ShapeRule::new(
            LineShape::MethodCall,
            r"\b([A-Za-z_$][\w$]*(?:\.|::|->)[A-Za-z_$][\w$]*)\s*\(",
            "Calls `{name}`, handing control to the {keyword} code.",
            "This call is how execution moves into the {keyword} implementation.",
        ),
        ShapeRule::new(
            LineShape::Export,
            r"^(?:export\b|module\.exports\b|exports\.([\w$]+))",
            "Exports the {keyword} functionality so other modules can reach it.",
            "Other files depend on {keyword} through this export.",
        ),
        ShapeRule::new(
            LineShape::Assignment,
            r#"^(?:(?:const|let|var|val)\s+(?:mut\s+)?)?([A-Za-z_$][\w$.\[\]'"]*)\s*(?::\s*[^=]+?)?\s*:?=(?:[^=>]|$)"#,
            "Stores a {keyword}-related value in `{name}` for later use.",
            "The value held in `{name}` feeds the {keyword} logic further on.",
        ),
    ]
});

const USAGE_EXPLANATION: &str = "Uses {keyword} here as part of the surrounding logic.";
const USAGE_WHY_RELEVANT: &str =
    "The line references {keyword} directly, which places it on the path being traced.";

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// The generated description of a matched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDescription {
    pub shape: LineShape,
    pub explanation: String,
    pub why_relevant: String,
}

/// Classify a line by its first matching rule
pub fn classify_line(line: &str) -> LineShape {
    let trimmed = line.trim();
    SHAPE_RULES
        .iter()
        .find(|rule| rule.regex.is_match(trimmed))
        .map(|rule| rule.shape)
        .unwrap_or(LineShape::Usage)
}

/// Describe a line that matched `keyword`
pub fn describe_line(line: &str, keyword: &str) -> LineDescription {
    let trimmed = line.trim();

    let matched = SHAPE_RULES
        .iter()
        .find_map(|rule| rule.regex.captures(trimmed).map(|caps| (rule, caps)));

    match matched {
        Some((rule, caps)) => {
            // First participating capture names the thing; otherwise the keyword does
            let name = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .next()
                .unwrap_or(keyword);

            LineDescription {
                shape: rule.shape,
                explanation: render(rule.explanation, keyword, name),
                why_relevant: render(rule.why_relevant, keyword, name),
            }
        }
        None => LineDescription {
            shape: LineShape::Usage,
            explanation: render(USAGE_EXPLANATION, keyword, keyword),
            why_relevant: render(USAGE_WHY_RELEVANT, keyword, keyword),
        },
    }
}

fn render(template: &str, keyword: &str, name: &str) -> String {
    template.replace("{keyword}", keyword).replace("{name}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_imports() {
        assert_eq!(classify_line("import { auth } from './b.ts'"), LineShape::Import);
        assert_eq!(classify_line("  from app.auth import login"), LineShape::Import);
        assert_eq!(classify_line("use crate::auth::Session;"), LineShape::Import);
        assert_eq!(classify_line("#include \"auth.h\""), LineShape::Import);
        assert_eq!(classify_line("import {"), LineShape::Import);
    }

    #[test]
    fn test_classify_require_and_instantiation() {
        assert_eq!(classify_line("const auth = require('./auth');"), LineShape::Require);
        assert_eq!(classify_line("const mod = await import('./auth')"), LineShape::Require);
        assert_eq!(classify_line("const s = new AuthService(db);"), LineShape::Instantiation);
        assert_eq!(classify_line("let s = AuthService::new(db);"), LineShape::Instantiation);
    }

    #[test]
    fn test_classify_definitions() {
        assert_eq!(classify_line("export class AuthService {"), LineShape::TypeDefinition);
        assert_eq!(classify_line("pub struct Session {"), LineShape::TypeDefinition);
        assert_eq!(classify_line("type AuthState = {"), LineShape::TypeDefinition);
        assert_eq!(
            classify_line("export function auth() { return verifyToken(); }"),
            LineShape::FunctionDefinition
        );
        assert_eq!(classify_line("async def authenticate(request):"), LineShape::FunctionDefinition);
        assert_eq!(classify_line("func (s *Server) Auth(w http.ResponseWriter) {"), LineShape::FunctionDefinition);
        assert_eq!(classify_line("pub(crate) async fn auth(req: Request) -> Response {"), LineShape::FunctionDefinition);
        assert_eq!(classify_line("const auth = async (req) => {"), LineShape::FunctionDefinition);
        assert_eq!(classify_line("export const handler = req => auth(req);"), LineShape::FunctionDefinition);
    }

    #[test]
    fn test_classify_calls_exports_assignments() {
        assert_eq!(classify_line("await authClient.refresh();"), LineShape::AsyncCall);
        assert_eq!(classify_line("fetchAuth().then(done);"), LineShape::AsyncCall);
        assert_eq!(classify_line("session.authenticate(user);"), LineShape::MethodCall);
        assert_eq!(classify_line("export default auth;"), LineShape::Export);
        assert_eq!(classify_line("module.exports = auth;"), LineShape::Export);
        assert_eq!(classify_line("const token = header.slice(7)"), LineShape::MethodCall);
        assert_eq!(classify_line("authenticated = true"), LineShape::Assignment);
        assert_eq!(classify_line("let mut auth_state = State::Idle;"), LineShape::Assignment);
        assert_eq!(classify_line("token := r.Header"), LineShape::Assignment);
    }

    #[test]
    fn test_classify_fallback() {
        assert_eq!(classify_line("if (auth == null) {"), LineShape::Usage);
        assert_eq!(classify_line("// auth is checked below"), LineShape::Usage);
        assert_eq!(classify_line(""), LineShape::Usage);
    }

    #[test]
    fn test_describe_uses_name_and_keyword() {
        let desc = describe_line("export function auth() { return verifyToken(); }", "auth");
        assert_eq!(desc.shape, LineShape::FunctionDefinition);
        assert_eq!(
            desc.explanation,
            "Defines `auth`, the function that implements this part of auth."
        );
        assert!(desc.why_relevant.contains("auth"));

        let desc = describe_line("import { auth } from './b.ts'", "auth");
        assert_eq!(desc.shape, LineShape::Import);
        assert!(desc.explanation.contains("`./b.ts`"));
    }

    #[test]
    fn test_describe_without_capture_falls_back_to_keyword() {
        let desc = describe_line("if (token) { check(token) }", "token");
        assert_eq!(desc.shape, LineShape::Usage);
        assert_eq!(desc.explanation, "Uses token here as part of the surrounding logic.");
        assert_eq!(
            desc.why_relevant,
            "The line references token directly, which places it on the path being traced."
        );
    }
}
