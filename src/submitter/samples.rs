/// Example prompts offered next to the question form.
pub const SAMPLE_QUESTIONS: [&str; 3] = [
    "Tell me about the TDS course",
    "When is the GA2 deadline?",
    "If a student scores 10/10 on GA4 as well as a bonus, how would it appear on the dashboard?",
];
