//! Prompt templates for RAG generation

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block from retrieved chunk texts
    pub fn build_context(chunks: &[String]) -> String {
        if chunks.is_empty() {
            return "(no documents have been ingested)".to_string();
        }

        let mut context = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            context.push_str(&format!("[{}]\n{}\n\n---\n\n", i + 1, chunk));
        }
        context
    }

    /// Build the full RAG prompt with strict grounding
    pub fn build_rag_prompt(question: &str, chunks: &[String]) -> String {
        format!(
            r#"You are a document-grounded assistant that ONLY uses information from provided documents.

GROUNDING RULES:
1. ONLY use information that is EXPLICITLY stated in the CONTEXT below
2. If the answer is not in the context, say that no relevant information was found in the uploaded documents
3. NEVER use external knowledge, general knowledge, or training data
4. Do NOT paraphrase in ways that change meaning - stay close to the source text

CONTEXT FROM DOCUMENTS:
{context}

QUESTION: {question}

Provide a grounded answer using ONLY the document content above:"#,
            context = Self::build_context(chunks),
            question = question
        )
    }
}
