//! The static content store and its read-only accessors.
//!
//! [`ContentStore`] is an explicit container handed to handlers through
//! [`crate::state::AppState`]; nothing reads content through a global. The
//! built-in record is constructed once and shared.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::domain::entities::{
    Certification, DetailedProject, DomainContent, Education, ExperienceEntry, Patent, PerDomain,
    PersonalInfo, PortfolioDomain, Project, Publication, SkillCategory,
};

/// The complete displayable record for both domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContent {
    pub personal: PersonalInfo,
    pub experience: PerDomain<Vec<ExperienceEntry>>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub cs: DomainContent,
    pub mechanical: DomainContent,
}

impl PortfolioContent {
    pub fn domain(&self, domain: PortfolioDomain) -> &DomainContent {
        match domain {
            PortfolioDomain::Cs => &self.cs,
            PortfolioDomain::Mechanical => &self.mechanical,
        }
    }

    pub fn domain_mut(&mut self, domain: PortfolioDomain) -> &mut DomainContent {
        match domain {
            PortfolioDomain::Cs => &mut self.cs,
            PortfolioDomain::Mechanical => &mut self.mechanical,
        }
    }
}

/// Read-only access to the portfolio content.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content: Arc<PortfolioContent>,
}

static BUILTIN: LazyLock<Arc<PortfolioContent>> = LazyLock::new(|| Arc::new(builtin_content()));

impl ContentStore {
    /// Store backed by the content compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            content: BUILTIN.clone(),
        }
    }

    pub fn new(content: PortfolioContent) -> Self {
        Self {
            content: Arc::new(content),
        }
    }

    /// Loads an alternative content record from a JSON file of the same shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match
    /// [`PortfolioContent`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file {}", path.display()))?;
        let content: PortfolioContent = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid content file {}", path.display()))?;
        Ok(Self::new(content))
    }

    pub fn domain(&self, domain: PortfolioDomain) -> &DomainContent {
        self.content.domain(domain)
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.content.personal
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.content.certifications
    }

    pub fn education(&self) -> &[Education] {
        &self.content.education
    }

    pub fn experience(&self, domain: PortfolioDomain) -> &[ExperienceEntry] {
        self.content.experience.get(domain)
    }

    /// Deep copy used to seed admin edit buffers.
    pub fn snapshot(&self) -> PortfolioContent {
        self.content.as_ref().clone()
    }

    /// Static asset path of the resume for `domain`.
    pub fn resume_path(&self, domain: PortfolioDomain) -> String {
        format!("/static/resume_{}.pdf", domain.as_str())
    }

    /// File name offered to the browser when downloading the resume.
    pub fn resume_file_name(&self, domain: PortfolioDomain) -> String {
        let compact: String = self
            .content
            .personal
            .name
            .split_whitespace()
            .collect();
        format!("{}_{}_Resume.pdf", compact, domain.resume_tag())
    }
}

fn s(value: &str) -> String {
    value.to_string()
}

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn category(name: &str, items: &[&str]) -> SkillCategory {
    SkillCategory {
        category: s(name),
        items: list(items),
    }
}

fn pexels(id: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w=800"
    )
}

fn software_project(title: &str, description: &str, technologies: &[&str], slug: &str, demo: &str, image: u32) -> Project {
    Project {
        title: s(title),
        description: s(description),
        technologies: list(technologies),
        github: Some(format!("https://github.com/alexthompson/{slug}")),
        demo: Some(s(demo)),
        image: pexels(image),
    }
}

fn engineering_project(title: &str, description: &str, technologies: &[&str], image: u32) -> Project {
    Project {
        title: s(title),
        description: s(description),
        technologies: list(technologies),
        github: None,
        demo: None,
        image: pexels(image),
    }
}

fn builtin_content() -> PortfolioContent {
    PortfolioContent {
        personal: PersonalInfo {
            name: s("Alex Thompson"),
            title: s("Software Engineer & Mechanical Engineer"),
            email: s("alex.thompson@example.com"),
            phone: s("+1 (555) 010-0199"),
            location: s("Pune, IN"),
            bio: s("Passionate engineer with expertise in both software development and mechanical engineering, bridging the gap between digital innovation and physical systems."),
            linkedin: s("https://linkedin.com/in/alex-thompson"),
            github: s("https://github.com/alexthompson"),
            twitter: s("https://twitter.com"),
            website: s("https://alex-thompson.example.com"),
            leetcode: s("https://leetcode.com/u/alexthompson/"),
        },
        experience: PerDomain {
            cs: vec![
                ExperienceEntry {
                    title: s("Senior Software Engineer"),
                    company: s("TechCorp Inc."),
                    location: s("San Francisco, CA"),
                    start_date: s("2023-01"),
                    end_date: s("Present"),
                    description: s("Lead development of scalable web applications using React, Node.js, and cloud technologies. Mentored junior developers and implemented CI/CD pipelines."),
                    achievements: list(&[
                        "Reduced application load time by 40% through optimization",
                        "Led team of 5 developers on major product redesign",
                        "Implemented automated testing reducing bugs by 60%",
                    ]),
                },
                ExperienceEntry {
                    title: s("Full Stack Developer"),
                    company: s("StartupXYZ"),
                    location: s("San Francisco, CA"),
                    start_date: s("2022-06"),
                    end_date: s("2022-12"),
                    description: s("Developed full-stack applications using modern web technologies. Collaborated with design team to create user-friendly interfaces."),
                    achievements: list(&[
                        "Built MVP that secured $2M in Series A funding",
                        "Developed real-time chat feature with 99.9% uptime",
                        "Optimized database queries improving performance by 50%",
                    ]),
                },
            ],
            mechanical: vec![
                ExperienceEntry {
                    title: s("Senior Mechanical Engineer"),
                    company: s("Engineering Solutions Ltd."),
                    location: s("San Francisco, CA"),
                    start_date: s("2020-03"),
                    end_date: s("2023-01"),
                    description: s("Led design and development of thermal management systems for industrial applications. Managed cross-functional teams and client relationships."),
                    achievements: list(&[
                        "Designed HVAC system reducing energy consumption by 30%",
                        "Led team of 8 engineers on $5M project",
                        "Obtained 3 patents for innovative cooling solutions",
                    ]),
                },
                ExperienceEntry {
                    title: s("Mechanical Engineer"),
                    company: s("Manufacturing Corp"),
                    location: s("San Jose, CA"),
                    start_date: s("2018-06"),
                    end_date: s("2020-03"),
                    description: s("Designed and optimized manufacturing processes for automotive components. Implemented lean manufacturing principles."),
                    achievements: list(&[
                        "Reduced manufacturing waste by 40%",
                        "Improved production efficiency by 25%",
                        "Implemented quality control systems",
                    ]),
                },
            ],
        },
        education: vec![
            Education {
                degree: s("Master of Science in Mechanical Engineering"),
                school: s("Stanford University"),
                location: s("Stanford, CA"),
                start_date: s("2016-09"),
                end_date: s("2018-06"),
                gpa: s("3.8/4.0"),
                coursework: list(&["Advanced Thermodynamics", "Fluid Mechanics", "Heat Transfer", "Materials Science"]),
            },
            Education {
                degree: s("Bachelor of Science in Mechanical Engineering"),
                school: s("UC Berkeley"),
                location: s("Berkeley, CA"),
                start_date: s("2012-09"),
                end_date: s("2016-06"),
                gpa: s("3.7/4.0"),
                coursework: list(&["Engineering Design", "Manufacturing Processes", "Control Systems", "Engineering Mathematics"]),
            },
        ],
        certifications: vec![
            Certification {
                name: s("AWS Certified Solutions Architect"),
                issuer: s("Amazon Web Services"),
                date: s("2023-08"),
                credential_id: s("AWS-SAA-123456"),
                link: s("https://aws.amazon.com/certification/"),
            },
            Certification {
                name: s("Professional Engineer (PE) License"),
                issuer: s("California Board of Engineers"),
                date: s("2020-05"),
                credential_id: s("PE-CA-789012"),
                link: s("https://www.bpelsg.ca.gov/"),
            },
            Certification {
                name: s("Six Sigma Green Belt"),
                issuer: s("ASQ"),
                date: s("2019-03"),
                credential_id: s("ASQ-GB-345678"),
                link: s("https://asq.org/cert/six-sigma-green-belt"),
            },
        ],
        cs: DomainContent {
            tagline: s("Building innovative software solutions with clean, scalable code"),
            about: s("Former Mechanical Engineer turned Software Developer with a passion for creating efficient, user-centric applications. My engineering background provides a unique perspective on problem-solving and system design."),
            skills: vec![
                category("Frontend", &["React", "Next.js", "TypeScript", "Tailwind CSS", "Vue.js"]),
                category("Backend", &["Node.js", "Python", "PostgreSQL", "MongoDB", "REST APIs"]),
                category("Tools & Platforms", &["Git", "Docker", "AWS", "Vercel", "Figma"]),
                category("Concepts", &["System Design", "Testing", "Agile", "DevOps", "UI/UX"]),
            ],
            projects: vec![
                software_project(
                    "E-Commerce Platform",
                    "Full-stack e-commerce solution with real-time inventory management and payment processing.",
                    &["Next.js", "TypeScript", "Stripe", "PostgreSQL"],
                    "ecommerce",
                    "https://ecommerce-demo.vercel.app",
                    972888,
                ),
                software_project(
                    "Task Management App",
                    "Collaborative project management tool with real-time updates and team collaboration features.",
                    &["React", "Node.js", "Socket.io", "MongoDB"],
                    "taskmanager",
                    "https://taskmanager-demo.netlify.app",
                    3183150,
                ),
                software_project(
                    "Weather Analytics Dashboard",
                    "Data visualization dashboard for weather patterns using real-time API data and interactive charts.",
                    &["Vue.js", "Python", "FastAPI", "Chart.js"],
                    "weather-dashboard",
                    "https://weather-analytics.herokuapp.com",
                    1118873,
                ),
            ],
            additional_projects: vec![
                software_project(
                    "Social Media Analytics Tool",
                    "Real-time social media monitoring and analytics platform with sentiment analysis and engagement tracking.",
                    &["React", "Python", "Flask", "Redis", "Chart.js"],
                    "social-analytics",
                    "https://social-analytics-demo.vercel.app",
                    267350,
                ),
                software_project(
                    "AI-Powered Code Review Assistant",
                    "Machine learning tool that analyzes code quality, suggests improvements, and detects potential bugs.",
                    &["Python", "TensorFlow", "FastAPI", "React", "Docker"],
                    "code-review-ai",
                    "https://code-review-ai.herokuapp.com",
                    1181671,
                ),
                software_project(
                    "Real-time Chat Application",
                    "Scalable chat application with end-to-end encryption, file sharing, and video calling capabilities.",
                    &["Node.js", "Socket.io", "React", "WebRTC", "MongoDB"],
                    "realtime-chat",
                    "https://realtime-chat-demo.herokuapp.com",
                    5926382,
                ),
            ],
            publications: Vec::new(),
            detailed_projects: Vec::new(),
            patents: Vec::new(),
        },
        mechanical: DomainContent {
            tagline: s("Designing innovative mechanical systems and optimizing manufacturing processes"),
            about: s("Experienced Mechanical Engineer with expertise in CAD design, thermal systems, and manufacturing optimization. Currently transitioning to software development while maintaining strong engineering fundamentals."),
            skills: vec![
                category("Design & Modeling", &["SolidWorks", "AutoCAD", "Fusion 360", "ANSYS", "Creo"]),
                category("Manufacturing", &["CNC Programming", "3D Printing", "Quality Control", "Lean Manufacturing"]),
                category("Analysis", &["FEA", "CFD", "Thermal Analysis", "MATLAB", "Python"]),
                category("Project Management", &["Six Sigma", "Agile", "Cost Estimation", "Supply Chain"]),
            ],
            projects: vec![
                engineering_project(
                    "Organic Rankine Cycle (ORC) Waste Heat Recovery System",
                    "Achieved 30% efficiency improvement by capturing waste heat from cold storage units and converting it to mechanical power.",
                    &["Thermodynamics", "CFD", "Energy Systems"],
                    1267338,
                ),
                engineering_project(
                    "CFD Case Study: Optimization of Cold Room Cooling and Stacking Patterns",
                    "Reduced energy consumption by 15% through optimized airflow and stacking configuration. Achieved ±1°C temperature uniformity.",
                    &["ANSYS Fluent", "Heat Transfer", "Flow Analysis"],
                    8438918,
                ),
                engineering_project(
                    "Heat Exchanger Performance Optimization using CFD",
                    "Improved heat transfer and pressure drop performance through detailed CFD simulations in ANSYS Fluent.",
                    &["CFD", "Heat Exchangers", "LMTD Analysis"],
                    1474993,
                ),
            ],
            additional_projects: vec![
                engineering_project(
                    "Hybrid Air-conditioning System for Passenger Vehicles",
                    "Boosted COP by 15% using exhaust heat recovery; cut automotive cooling energy consumption by 10%.",
                    &["Automotive HVAC", "Thermal Design", "Energy Recovery"],
                    2085831,
                ),
                engineering_project(
                    "Precision Machining Fixture Design",
                    "Developed custom fixtures for aerospace components achieving ±0.001\" tolerance with 99.8% repeatability.",
                    &["Precision Machining", "GD&T", "Metrology", "Quality Systems"],
                    8853501,
                ),
                engineering_project(
                    "Thermal Management System for Electronics",
                    "Developed innovative cooling solution for high-power electronics reducing operating temperature by 25°C.",
                    &["Thermal Design", "Heat Transfer", "Electronics Cooling", "CFD Analysis"],
                    8853499,
                ),
            ],
            publications: vec![
                Publication {
                    title: s("Performance Investigation on Organic Rankine Cycle from a Low-temperature Heat Source"),
                    journal: s("CSITE (Scopus, Sci Indexed, Q1)"),
                    year: 2025,
                    doi: s("https://doi.org/10.1016/j.csite.2025.105841"),
                    description: s("Comprehensive analysis of ORC performance optimization for low-temperature waste heat recovery applications."),
                },
                Publication {
                    title: s("Design, development & performance evaluation of sustainable, hybrid air-conditioning system for automobiles"),
                    journal: s("IJoSI (Scopus Indexed, Q3)"),
                    year: 2024,
                    doi: s("https://doi.org/10.6977/IJoSI.202409_8(3).0007"),
                    description: s("Novel hybrid HVAC system design achieving significant energy savings in automotive applications."),
                },
            ],
            detailed_projects: vec![
                DetailedProject {
                    title: s("Autonomous Robotic Assembly System"),
                    description: s("Developed a fully autonomous robotic assembly line for automotive components, integrating computer vision, machine learning, and precision robotics. The system achieved 99.7% accuracy and reduced assembly time by 45%."),
                    technologies: list(&["Robotics", "Computer Vision", "PLC Programming", "SCADA", "Six Sigma"]),
                    image: pexels(2085831),
                    link: s("https://example.com/robotic-assembly-report"),
                    duration: s("18 months"),
                    team: s("5 engineers"),
                },
                DetailedProject {
                    title: s("Next-Generation HVAC Control System"),
                    description: s("Designed and prototyped an intelligent HVAC system using IoT sensors and predictive algorithms. The system optimizes energy consumption while maintaining optimal comfort levels, achieving 30% energy savings."),
                    technologies: list(&["IoT", "Thermal Dynamics", "Control Systems", "Energy Modeling", "Prototyping"]),
                    image: pexels(8853502),
                    link: s("https://example.com/hvac-system-demo"),
                    duration: s("12 months"),
                    team: s("3 engineers"),
                },
                DetailedProject {
                    title: s("Advanced Fluid Dynamics Simulation Platform"),
                    description: s("Created a comprehensive CFD simulation platform for optimizing turbomachinery design. The platform reduced design iteration time by 70% and improved performance predictions accuracy by 25%."),
                    technologies: list(&["CFD", "ANSYS Fluent", "Python", "High-Performance Computing", "Turbomachinery"]),
                    image: pexels(8853498),
                    link: s("https://example.com/cfd-platform-demo"),
                    duration: s("16 months"),
                    team: s("7 engineers"),
                },
            ],
            patents: vec![
                Patent {
                    title: s("ORC Test Rig for Waste Heat Recovery"),
                    application_number: s("Patent No: 425785-001"),
                    status: s("Filed"),
                    year: 2025,
                    patent_number: None,
                    description: s("A system designed to harness waste heat using an Organic Rankine Cycle setup."),
                    link: None,
                },
                Patent {
                    title: s("Baffle-Integrated Water Jacket"),
                    application_number: s("Patent No: 429677-001"),
                    status: s("Filed"),
                    year: 2024,
                    patent_number: None,
                    description: s("A water jacket design with integrated baffles to enhance thermal transfer in engine cooling."),
                    link: None,
                },
                Patent {
                    title: s("Adaptive Thermal Management System for Electronic Devices"),
                    application_number: s("US17/123,456"),
                    status: s("Granted"),
                    year: 2023,
                    patent_number: Some(s("US11,234,567 B2")),
                    description: s("Innovative cooling system that dynamically adjusts thermal management based on real-time temperature monitoring and predictive algorithms."),
                    link: Some(s("https://patents.uspto.gov/patent/11234567")),
                },
            ],
        },
    }
}
