//! Small labelled resume corpus and a pipeline trained on it, shared by unit tests.

use std::sync::LazyLock;

use crate::pipeline::{clean_text, Pipeline};

const CORPUS: &[(&str, &str)] = &[
    ("Data Science", "Data scientist skilled in Python, pandas, NumPy and scikit-learn. Built machine learning models for churn prediction."),
    ("Data Science", "Machine learning engineer: deep learning with TensorFlow, NLP, statistics, regression and classification models."),
    ("Data Science", "Experience in data analysis, predictive modelling, Python, R, matplotlib visualisation and machine learning pipelines."),
    ("Data Science", "Statistics and data mining. Python, SQL, Tableau dashboards, clustering and neural networks for forecasting."),
    ("DevOps Engineer", "DevOps engineer automating CI/CD pipelines with Jenkins, Docker and Kubernetes on AWS."),
    ("DevOps Engineer", "Infrastructure as code using Terraform and Ansible. Monitoring with Prometheus and Grafana, Linux administration."),
    ("DevOps Engineer", "Managed Kubernetes clusters, Docker containers, Jenkins build pipelines and AWS cloud deployments."),
    ("DevOps Engineer", "Site reliability: Linux servers, shell scripting, Ansible playbooks, Git, continuous deployment and Docker."),
    ("HR", "HR executive handling recruitment, onboarding, payroll processing and employee relations."),
    ("HR", "Human resources generalist: talent acquisition, interviews, performance appraisal and payroll."),
    ("HR", "Recruitment specialist sourcing candidates, conducting interviews, employee engagement and HR policies."),
    ("HR", "Payroll administration, statutory compliance, employee grievances, onboarding and training coordination."),
    ("Java Developer", "Java developer with Spring Boot, Hibernate, REST APIs and microservices."),
    ("Java Developer", "Core Java, J2EE, Spring MVC, Hibernate ORM, Maven builds and JUnit tests for enterprise applications."),
    ("Java Developer", "Backend Java engineer building Spring Boot microservices, JPA, Hibernate and Oracle SQL."),
    ("Java Developer", "Developed Java servlets, JSP, Spring framework modules and multithreaded Java services."),
    ("Testing", "QA engineer: manual testing, test cases, regression testing and defect tracking in JIRA."),
    ("Testing", "Automation testing with Selenium WebDriver, TestNG, test plans and bug reports."),
    ("Testing", "Software tester performing functional testing, regression suites, smoke testing and defect triage."),
    ("Testing", "Test automation frameworks, Selenium, API testing with Postman, test execution reports."),
    ("Web Designing", "Web designer creating responsive layouts with HTML, CSS, Bootstrap and JavaScript."),
    ("Web Designing", "UI design in Photoshop and Figma, HTML5, CSS3, jQuery animations and responsive web pages."),
    ("Web Designing", "Front-end web design: wireframes, typography, CSS styling, WordPress themes and HTML templates."),
    ("Web Designing", "Designed websites using HTML, CSS, JavaScript, Adobe Illustrator graphics and responsive design."),
];

/// `(label, raw text)` pairs, six categories with four resumes each.
pub fn sample_corpus() -> Vec<(String, String)> {
    CORPUS
        .iter()
        .map(|(label, text)| (label.to_string(), text.to_string()))
        .collect()
}

static TRAINED: LazyLock<Pipeline> = LazyLock::new(|| {
    let (labels, documents): (Vec<String>, Vec<String>) = sample_corpus()
        .into_iter()
        .map(|(label, text)| (label, clean_text(&text)))
        .unzip();
    let mut pipeline = Pipeline::default();
    pipeline
        .fit(&documents, &labels)
        .expect("fixture corpus must train");
    pipeline
});

/// A pipeline fitted on [`sample_corpus`] with default settings.
pub fn trained_pipeline() -> Pipeline {
    TRAINED.clone()
}

/// A one-page PDF showing `text` in Helvetica, or a blank page for `None`.
/// Cross-reference offsets are computed, so the file parses without repair.
pub fn single_page_pdf(text: Option<&str>) -> Vec<u8> {
    let content = match text {
        Some(text) => format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET"),
        None => String::new(),
    };
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        tail.push_str(&format!("{offset:010} 00000 n \n"));
    }
    tail.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(tail.as_bytes());
    pdf
}
