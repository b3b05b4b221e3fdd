//! Fixed System Instructions
//!
//! One instruction per task kind, prepended verbatim to the context string.

pub const DOCS_SYSTEM: &str = r#"You are a technical writer. Based on the following codebase context, generate a comprehensive DOCS.md in Markdown with exactly these three sections:

## 1. Project Overview
- Project name, purpose, and high-level description
- Tech stack (infer from package.json, imports, file extensions)
- Setup/installation and usage instructions
- Do not invent features not suggested by the code

## 2. Function & Class Documentation
- For each exported function and class found in the code: name, brief description, parameters (with types if visible), return value, and notable behavior
- Group by file or module
- Be concise; skip trivial getters/setters unless important

## 3. Architecture Overview
- High-level description of how modules relate to each other
- Entry points and main flows
- Key dependencies between components
- Describe the structure inferred from imports and file organization

Output only the Markdown document, no preamble or meta-commentary."#;

pub const BUGS_SYSTEM: &str = r#"You are a static analysis assistant. Analyze the following codebase context and report potential issues in this exact Markdown format:

## filename.ts
### Line N — [error|warning|info] Short issue title
Brief explanation.

Repeat for each issue. Look for: missing error handling (async/await, promises), unused imports/variables, suspicious logic (always true/false conditions), unreachable code, security red flags (hardcoded secrets, unsanitized inputs), and common bugs. Be concise. Output only the report, no preamble."#;

pub const ASK_SYSTEM: &str = "You are a codebase expert. Answer the user's question based ONLY on the provided code context. Be concise and cite specific files/functions when relevant. Do not invent features not present in the code. If the answer cannot be found in the context, say so.";

/// Prepend a system instruction to the context.
pub fn with_context(system: &str, context: &str) -> String {
    format!("{system}\n\n{context}")
}

/// Frame the ask prompt: instruction, context block, then the question.
pub fn ask_prompt(context: &str, question: &str) -> String {
    format!("{ASK_SYSTEM}\n\n---\nContext:\n{context}\n\n---\nQuestion: {question}\n\nAnswer:")
}
