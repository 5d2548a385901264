// Prompt templates for the screening flows.
// Placeholders are substituted with `str::replace` before the call.

pub const CRITERIA_PROMPT_TEMPLATE: &str = r#"You are an expert job description analyst. Analyse the job description given in triple backticks:
Input text: ```{jd_text}```

List the key selection criteria for shortlisting candidates for this job, in simple English.

Output format: a JSON object with the single key "Criteria":
"Criteria": [<criterion 1>, <criterion 2>, ..., <criterion n>]

Note: keep each criterion crisp and precise, covering skills, certifications, experience, qualifications and similar requirements, each with its condition.
Note: if the description mentions no selection criteria at all, output "Not Mentioned" as the value of "Criteria"."#;

pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an expert resume scorer. Given the list of criteria in triple backticks: criteria = ```{criteria}```
and the resume of a candidate in triple angle brackets: resume = <<<{resume_text}>>>

Score the candidate against each criterion on a scale of 0 to 5, where 0 means no evidence and 5 means the criterion is fully met.

Output format: a JSON object with exactly 2 keys, "name" and "scores":
"name": (string) the full name of the candidate whose resume is given
"scores": (list of {n} integers, each 0-5) one score per criterion, in the same order as the criteria list"#;
