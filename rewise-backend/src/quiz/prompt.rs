const QUIZ_TEMPLATE: &str = "You are an expert quiz maker. Generate 5-10 MCQs with 4 options (A-D), correct answer, and short explanation. Avoid repeating questions.

Given the following text, generate MCQs:

Text:
{input_text}

Output format:
Q1: Question?
A) ...
B) ...
C) ...
D) ...
Answer: <LETTER>
Explanation: <short>
";

/// Build the completion prompt for a note's text.
pub fn build_quiz_prompt(note_text: &str) -> String {
    QUIZ_TEMPLATE.replace("{input_text}", note_text.trim())
}
