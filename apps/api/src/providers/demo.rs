use crate::providers::Job;

fn job(title: &str, company: &str, location: &str, description: &str, apply_link: &str) -> Job {
    Job {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        apply_link: apply_link.to_string(),
    }
}

/// Built-in placeholder listings. Served to users only in demo mode; otherwise
/// used solely as a scoring corpus when live search yields nothing.
pub fn demo_jobs() -> Vec<Job> {
    vec![
        job(
            "Product Management Summer Intern",
            "TechCorp India",
            "Bangalore, Karnataka",
            "Product management summer internship focusing on user research, market analysis, roadmap planning, stakeholder communication, and product strategy. Experience with Agile, Scrum, JIRA, and analytics tools preferred. Duration: 3 months.",
            "https://careers.techcorp.com/internships/pm",
        ),
        job(
            "Business Analyst Intern - Graduate Program",
            "ConsultingXYZ",
            "Mumbai, Maharashtra",
            "Business analysis internship involving requirements gathering, process improvement, data analysis, stakeholder management, and documentation. Knowledge of SQL, Excel, and business intelligence tools required. Full-time conversion opportunity.",
            "https://careers.consultingxyz.com/graduate-program",
        ),
        job(
            "Digital Marketing Intern",
            "Digital Solutions Ltd",
            "Delhi, NCR",
            "Digital marketing internship covering market research, campaign planning, content strategy, social media management, and performance analytics. Experience with Google Analytics and marketing automation tools preferred. Stipend provided.",
            "https://careers.digitalsolutions.com/internships",
        ),
        job(
            "Operations Management Trainee",
            "LogisticsPro India",
            "Pune, Maharashtra",
            "Operations management trainee program focusing on process optimization, supply chain coordination, quality assurance, vendor management, and operational efficiency. Knowledge of Lean Six Sigma and project management methodologies preferred. 6-month program.",
            "https://careers.logisticspro.com/trainee-program",
        ),
        job(
            "Strategy & Analytics Intern",
            "DataTech Solutions",
            "Hyderabad, Telangana",
            "Strategy and analytics internship involving market research, data analysis, business intelligence, dashboard creation, and strategic planning. Experience with SQL, Python, Tableau, and analytical tools required. Remote work options available.",
            "https://careers.datatech.com/internships/strategy",
        ),
        job(
            "Product Development Intern",
            "InnovateCorp",
            "Chennai, Tamil Nadu",
            "Product development internship focusing on user experience design, product testing, market validation, competitive analysis, and product launch strategies. Experience with design thinking and customer research preferred. Mentorship provided.",
            "https://careers.innovatecorp.com/product-internship",
        ),
        job(
            "Management Consultant Intern",
            "Strategy Partners",
            "Gurgaon, Haryana",
            "Management consulting internship involving client engagement, business analysis, strategic recommendations, presentation development, and project management. Strong analytical and communication skills required. PPO opportunity available.",
            "https://careers.strategypartners.com/intern-program",
        ),
        job(
            "Growth & Strategy Intern",
            "StartupHub India",
            "Bangalore, Karnataka",
            "Growth and strategy internship in a fast-paced startup environment. Responsibilities include market expansion, growth hacking, partnership development, and strategic initiatives. Equity participation and flexible work arrangements available.",
            "https://careers.startuphub.com/growth-intern",
        ),
    ]
}
