//! Static portfolio content and the contact form.
//!
//! Everything here is read-only data compiled into the binary. The contact
//! form validates its fields and logs the submission; there is no delivery
//! backend.

use crate::error::ContactError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCategory {
    AiMlPlatform,
    HealthcareAi,
    EnergySystems,
    ComputerVision,
    EducationTech,
}

impl ProjectCategory {
    pub fn label(self) -> &'static str {
        match self {
            ProjectCategory::AiMlPlatform => "AI/ML Platform",
            ProjectCategory::HealthcareAi => "Healthcare AI",
            ProjectCategory::EnergySystems => "Energy Systems",
            ProjectCategory::ComputerVision => "Computer Vision",
            ProjectCategory::EducationTech => "Education Tech",
        }
    }
}

/// Headline numbers shown on a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectMetrics {
    pub accuracy: Option<&'static str>,
    pub performance: Option<&'static str>,
    pub impact: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub long_description: &'static str,
    pub category: ProjectCategory,
    pub technologies: &'static [&'static str],
    pub github_url: Option<&'static str>,
    pub live_url: Option<&'static str>,
    pub featured: bool,
    pub metrics: Option<ProjectMetrics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub id: &'static str,
    pub company: &'static str,
    pub position: &'static str,
    pub duration: &'static str,
    pub location: &'static str,
    pub description: &'static [&'static str],
    pub technologies: &'static [&'static str],
    pub achievements: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Competition,
    Research,
    Recognition,
    Academic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub year: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub category: AchievementCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechCategory {
    pub name: &'static str,
    pub technologies: &'static [&'static str],
    /// Accent as `0xRRGGBB`.
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: &'static str,
    pub phone: &'static str,
    pub location: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub id: &'static str,
    pub platform: &'static str,
    pub url: &'static str,
}

pub static PROJECTS: &[Project] = &[
    Project {
        id: "1",
        title: "NeuroVision Transformer",
        description: "Medical AI Platform for ASD detection with interpretable ViT architecture",
        long_description: "Interpretable Vision Transformer for Autism Spectrum Disorder detection \
            achieving 96.7% accuracy, in field testing in government hospitals with \
            clinical-grade validation.",
        category: ProjectCategory::HealthcareAi,
        technologies: &[
            "PyTorch",
            "Vision Transformers",
            "Medical Imaging",
            "Clinical Validation",
            "Government Deployment",
        ],
        github_url: None,
        live_url: None,
        featured: true,
        metrics: Some(ProjectMetrics {
            accuracy: Some("96.7%"),
            performance: Some("Clinical-grade"),
            impact: Some("Government Hospital Deployment"),
        }),
    },
    Project {
        id: "2",
        title: "AutoML Studio",
        description: "Enterprise ML Platform reducing development time by 90%",
        long_description: "No-code machine learning platform with automated feature \
            engineering, hyperparameter tuning and Neural Architecture Search for \
            enterprise deployment.",
        category: ProjectCategory::AiMlPlatform,
        technologies: &[
            "AutoML",
            "Neural Architecture Search",
            "Feature Engineering",
            "Enterprise Platform",
            "No-Code ML",
        ],
        github_url: None,
        live_url: None,
        featured: true,
        metrics: Some(ProjectMetrics {
            accuracy: Some("Automated optimization"),
            performance: Some("90% faster development"),
            impact: Some("Enterprise-ready"),
        }),
    },
    Project {
        id: "3",
        title: "Learnify",
        description: "AI-powered Learning Platform with adaptive learning paths",
        long_description: "Educational platform using machine learning to build personalized \
            learning experiences and adaptive curriculum paths from individual student \
            performance.",
        category: ProjectCategory::EducationTech,
        technologies: &[
            "Adaptive Learning",
            "Personalization",
            "Educational AI",
            "Learning Analytics",
            "Student Performance",
        ],
        github_url: None,
        live_url: None,
        featured: true,
        metrics: Some(ProjectMetrics {
            accuracy: Some("Performance-based"),
            performance: Some("Adaptive Paths"),
            impact: Some("Personalized Learning"),
        }),
    },
    Project {
        id: "4",
        title: "GridAI",
        description: "Smart Energy Forecasting with transformer-based demand prediction",
        long_description: "Transformer-based energy demand forecasting achieving 94% accuracy \
            with sub-50ms latency for real-time predictions in production.",
        category: ProjectCategory::EnergySystems,
        technologies: &[
            "Transformers",
            "Time Series",
            "Energy Forecasting",
            "Real-time Systems",
            "Production Deployment",
        ],
        github_url: None,
        live_url: None,
        featured: false,
        metrics: Some(ProjectMetrics {
            accuracy: Some("94%"),
            performance: Some("Sub-50ms latency"),
            impact: Some("Production Energy Systems"),
        }),
    },
    Project {
        id: "5",
        title: "FitAI Pro",
        description: "CV-based Fitness Platform with 99.2% pose estimation accuracy",
        long_description: "Computer vision fitness platform with real-time form correction, \
            personalized workout planning and nutritional guidance built on pose estimation.",
        category: ProjectCategory::ComputerVision,
        technologies: &[
            "Computer Vision",
            "Pose Estimation",
            "Mobile Edge",
            "Real-time Processing",
            "Fitness AI",
        ],
        github_url: None,
        live_url: None,
        featured: false,
        metrics: Some(ProjectMetrics {
            accuracy: Some("99.2%"),
            performance: Some("Real-time feedback"),
            impact: Some("Mobile edge deployment"),
        }),
    },
];

pub static EXPERIENCES: &[Experience] = &[
    Experience {
        id: "1",
        company: "Lentit",
        position: "Machine Learning Engineer Intern",
        duration: "Mar 2025 – Jun 2025",
        location: "Remote",
        description: &[
            "Improved e-commerce demand forecasting accuracy by 18% using time series models",
            "Implemented MLflow and Prometheus monitoring pipelines for model performance tracking",
            "Optimized PySpark workflows, reducing ETL processing time by 45%",
            "Deployed AWS Lambda ML microservices with sub-100ms response times",
        ],
        technologies: &[
            "PyTorch",
            "MLflow",
            "Prometheus",
            "PySpark",
            "AWS Lambda",
            "Time Series Analysis",
        ],
        achievements: &[
            "18% improvement in demand forecasting accuracy",
            "45% reduction in ETL processing time",
            "Sub-100ms microservice response times",
            "Production-grade monitoring implementation",
        ],
    },
    Experience {
        id: "2",
        company: "Bennett University AI Lab",
        position: "AI Research Engineer",
        duration: "May 2024 – Apr 2025",
        location: "Greater Noida, India",
        description: &[
            "Architected distributed transformer training on 4×A100 GPUs, 80% faster training",
            "Built a TensorRT-optimized inference system with 15ms latency",
            "Led multi-modal AI research resulting in 3 peer-reviewed papers",
            "Mentored junior researchers on reproducible AI research",
        ],
        technologies: &[
            "PyTorch",
            "TensorRT",
            "A100 GPUs",
            "Distributed Training",
            "Multi-modal AI",
            "Research Publications",
        ],
        achievements: &[
            "80% faster distributed training performance",
            "15ms inference latency with TensorRT optimization",
            "3 papers published at top-tier AI conferences",
            "Research team leadership and mentoring",
        ],
    },
];

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "1",
        title: "Smart India Hackathon – National Champion",
        year: "2024",
        description: "AI healthcare solution adopted by Ministry of Health",
        impact: "Government adoption and nationwide deployment",
        category: AchievementCategory::Competition,
    },
    Achievement {
        id: "2",
        title: "Microsoft AI Challenge – Finalist",
        year: "2025",
        description: "GPT-powered enterprise assistant boosting productivity by 40%",
        impact: "Enterprise productivity enhancement",
        category: AchievementCategory::Competition,
    },
    Achievement {
        id: "3",
        title: "Google AI Fest – Youngest Finalist",
        year: "2023",
        description: "AI-driven environmental monitoring platform",
        impact: "Environmental sustainability focus",
        category: AchievementCategory::Competition,
    },
    Achievement {
        id: "4",
        title: "Best Investor Pitch Award",
        year: "2024",
        description: "Recognition for strategic vision and growth potential",
        impact: "Investment and business strategy recognition",
        category: AchievementCategory::Recognition,
    },
    Achievement {
        id: "5",
        title: "Dean's List Award (2×)",
        year: "2023-2024",
        description: "Top 1% university ranking with 9.22/10 CGPA",
        impact: "Academic excellence recognition",
        category: AchievementCategory::Academic,
    },
];

pub static TECH_STACK: &[TechCategory] = &[
    TechCategory {
        name: "AI/ML Frameworks",
        technologies: &[
            "PyTorch",
            "TensorFlow",
            "JAX",
            "Hugging Face",
            "OpenCV",
            "YOLO",
            "Detectron2",
            "CLIP",
            "LangChain",
            "LlamaIndex",
        ],
        color: 0x4db6ac,
    },
    TechCategory {
        name: "MLOps & Cloud",
        technologies: &[
            "Docker",
            "Airflow",
            "MLflow",
            "AWS",
            "GCP",
            "Azure ML",
            "Kubernetes",
            "TensorRT",
            "ONNX",
        ],
        color: 0x5c9bd5,
    },
    TechCategory {
        name: "Big Data & Analytics",
        technologies: &[
            "Apache Spark",
            "Dask",
            "Ray",
            "Kafka",
            "PostgreSQL",
            "MongoDB",
            "Redis",
            "InfluxDB",
        ],
        color: 0x7cb342,
    },
    TechCategory {
        name: "Programming & Tools",
        technologies: &[
            "Python",
            "C/C++",
            "SQL",
            "Git",
            "Jupyter",
            "Financial Time Series",
            "Statistical Analysis",
        ],
        color: 0x9575cd,
    },
    TechCategory {
        name: "Specialized AI",
        technologies: &[
            "Transformer Models",
            "Reinforcement Learning (PPO/DQN)",
            "GANs",
            "Diffusion Models",
            "Model Quantization",
        ],
        color: 0xffca28,
    },
];

pub static CONTACT_INFO: ContactInfo = ContactInfo {
    email: "hello@example.com",
    phone: "+00 0000 000000",
    location: "Delhi, India",
};

pub static SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        id: "1",
        platform: "LinkedIn",
        url: "https://www.linkedin.com/in/example",
    },
    SocialLink {
        id: "2",
        platform: "GitHub",
        url: "https://github.com/example",
    },
    SocialLink {
        id: "3",
        platform: "Kaggle",
        url: "https://kaggle.com/example",
    },
    SocialLink {
        id: "4",
        platform: "Email",
        url: "mailto:hello@example.com",
    },
];

/// Projects marked as featured, in table order.
pub fn featured_projects() -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(|p| p.featured)
}

/// Outcome of a contact submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The message was written to the log. Nothing was sent.
    LoggedOnly,
}

/// The contact form's four fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Check every field is present and the email looks like an address.
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        let email = self.email.trim();
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
            None => false,
        };
        if !valid {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Validate, then log the submission.
    pub fn submit(&self) -> Result<Submission, ContactError> {
        self.validate()?;
        log::info!(
            "Contact form submitted by {} <{}>: {} ({} chars)",
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.chars().count()
        );
        Ok(Submission::LoggedOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "Hello", "Nice site.")
    }

    #[test]
    fn test_submit_logs_only() {
        assert_eq!(filled().submit(), Ok(Submission::LoggedOnly));
    }

    #[test]
    fn test_every_field_required() {
        let mut form = filled();
        form.subject = "   ".into();
        assert_eq!(form.submit(), Err(ContactError::MissingField("subject")));

        assert_eq!(
            ContactForm::default().submit(),
            Err(ContactError::MissingField("name"))
        );
    }

    #[test]
    fn test_email_shape() {
        for bad in ["ada", "@example.com", "ada@", "a@b@c"] {
            let mut form = filled();
            form.email = bad.into();
            assert_eq!(form.submit(), Err(ContactError::InvalidEmail(bad.into())));
        }
    }

    #[test]
    fn test_tables() {
        assert_eq!(PROJECTS.len(), 5);
        assert_eq!(featured_projects().count(), 3);
        assert_eq!(TECH_STACK.len(), 5);
        assert!(SOCIAL_LINKS.iter().any(|l| l.platform == "GitHub"));
        assert_eq!(PROJECTS[0].category.label(), "Healthcare AI");
        assert!(EXPERIENCES.iter().all(|e| !e.achievements.is_empty()));
        assert!(ACHIEVEMENTS
            .iter()
            .any(|a| a.category == AchievementCategory::Academic));
    }
}
