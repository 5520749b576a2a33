// Prompt for project document generation.
// System prompt: llm_client::prompts::HTML_DOCUMENT_SYSTEM.

/// Project plan prompt template.
/// Replace: {profession}, {level}, {specialization}, {language}
///
/// The extractor depends on the placement rules in items 1 and 2.
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"You are an experienced learning mentor. I need a detailed project plan for a learner who chose the profession '{profession}', level '{level}' and specialization '{specialization}'.
Write the whole document in this language: '{language}'.

Generate the HTML of a complete project description, roughly 5 A4 pages long. Include these sections:
1. Project title: put it in BOTH the <title> tag and the <h1> tag.
2. Project description: what has to be built and why. It MUST be the first <p> right after the <h1>.
3. Project tasks: a detailed step-by-step list of tasks to complete.
4. What to learn: the technologies, tools and concepts required.
5. Learning resources: documentation, tutorials and articles to study. Give only the names and types of resources, never real URLs.
6. Success criteria: how the finished project will be evaluated.
7. Expected outcome: what the learner gains after finishing the project.

Use semantic HTML5 tags (<header>, <main>, <footer>, <section>, <article>).
Apply basic CSS inside a <style> tag in <head> so the PDF looks neat and professional: style headings, paragraphs and lists, add spacing and alignment, keep the text readable and split into paragraphs and lists.

HARD RULES:
1. The HTML must be self-contained: no external CSS, JS, fonts or images
2. No <link>, <script> or <img> tags
3. Return the HTML document only"#;

/// Fills the project prompt template for one request.
pub fn build_project_prompt(
    profession: &str,
    level: &str,
    specialization: &str,
    language: &str,
) -> String {
    PROJECT_PROMPT_TEMPLATE
        .replace("{profession}", profession)
        .replace("{level}", level)
        .replace("{specialization}", specialization)
        .replace("{language}", language)
}
