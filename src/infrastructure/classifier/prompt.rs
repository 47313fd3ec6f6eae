const CLASSIFICATION_TEMPLATE: &str = r#"You are a query classification agent for workplace questions.
Classify the query into one of the following categories:
- RAG_AGENT → HR, Company Policy, Employee Handbook, internal documents
- WEBSEARCH_AGENT → general company/employee info not in internal docs
- IT_SUPPORT → IT issues such as laptops, accounts, passwords, VPN or software access
- OTHER → greetings, chit-chat, or unclear queries

Output format (strict JSON):
{"route": "<RAG_AGENT | WEBSEARCH_AGENT | IT_SUPPORT | OTHER>", "reply": "<if OTHER, provide a friendly direct reply, else empty>"}

Query: ${query}"#;

/// Render the classification prompt for `query`
pub fn build_classification_prompt(query: &str) -> String {
    CLASSIFICATION_TEMPLATE.replace("${query}", query)
}
