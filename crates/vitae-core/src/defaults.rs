//! Built-in datasets: the empty skeleton every session starts from, and a
//! fully populated demo résumé.

use crate::document::{
  BasicDetails, Document, EducationContent, EducationEntry, ExperienceContent,
  ExperienceEntry, ProfileSummaryContent, ProjectEntry, ProjectsContent,
  Section, SectionContent, SkillCategory, SummaryFormat, TechSkillsContent,
  VolunteerContent, VolunteerEntry,
};

/// Name of the single skill category in a fresh skeleton.
pub const DEFAULT_CATEGORY_NAME: &str = "Technical Skills";

impl Document {
  /// The default document: empty basic details and one section per type,
  /// each visible, each list holding a single empty item.
  pub fn skeleton() -> Self {
    Self {
      basic_details: BasicDetails::default(),
      sections:      vec![
        Section::new(SectionContent::ProfileSummary(ProfileSummaryContent {
          format:  SummaryFormat::Paragraph,
          text:    Some(String::new()),
          bullets: None,
        })),
        Section::new(SectionContent::TechSkills(TechSkillsContent {
          categories: vec![SkillCategory {
            name:   DEFAULT_CATEGORY_NAME.into(),
            skills: String::new(),
          }],
        })),
        Section::new(SectionContent::Experience(ExperienceContent {
          entries: vec![ExperienceEntry::blank()],
        })),
        Section::new(SectionContent::Projects(ProjectsContent {
          entries: vec![ProjectEntry::blank()],
        })),
        Section::new(SectionContent::Volunteer(VolunteerContent {
          entries: vec![VolunteerEntry::blank()],
        })),
        Section::new(SectionContent::Education(EducationContent {
          entries: vec![EducationEntry::default()],
        })),
      ],
    }
  }

  /// A complete sample résumé, handy for trying out the compile round trip.
  pub fn demo() -> Self {
    Self {
      basic_details: BasicDetails {
        first_name: "Priya".into(),
        last_name:  "Sharma".into(),
        email:      "priya.sharma@email.com".into(),
        city:       "Toronto".into(),
        province:   "ON".into(),
        github:     Some("https://github.com/priyasharma".into()),
        linkedin:   Some("https://linkedin.com/in/priyasharma".into()),
        portfolio:  Some("https://priyasharma.dev".into()),
      },
      sections:      vec![
        Section::new(SectionContent::ProfileSummary(ProfileSummaryContent {
          format:  SummaryFormat::Bullets,
          text:    None,
          bullets: Some(strings(&[
            "Data Engineer with 3+ years of experience building scalable data pipelines and analytics solutions",
            "Specialized in Python, SQL, and cloud technologies with proven track record of optimizing data workflows",
            "Strong communicator with experience mentoring junior team members and presenting insights to stakeholders",
          ])),
        })),
        Section::new(SectionContent::TechSkills(TechSkillsContent {
          categories: vec![
            category("Programming Languages", "Python, SQL, Java, JavaScript, R"),
            category(
              "Data Engineering",
              "Apache Spark, Airflow, Kafka, DBT, Snowflake",
            ),
            category(
              "Cloud & DevOps",
              "AWS (S3, Lambda, Glue, Redshift), Docker, Kubernetes, Terraform",
            ),
            category(
              "Databases",
              "PostgreSQL, MySQL, MongoDB, Redis, Cassandra",
            ),
            category(
              "Tools & Frameworks",
              "Git, Pandas, NumPy, React, FastAPI, Django",
            ),
          ],
        })),
        Section::new(SectionContent::Experience(ExperienceContent {
          entries: vec![
            ExperienceEntry {
              company:    "Royal Bank of Canada (RBC)".into(),
              title:      "Data Engineer".into(),
              location:   "Toronto, ON".into(),
              start_date: "Jan 2021".into(),
              end_date:   "Dec 2024".into(),
              bullets:    strings(&[
                "Built and maintained 15+ data pipelines processing 2TB+ daily data using Apache Spark and Airflow, reducing processing time by 40%",
                "Migrated legacy SQL Server databases to Google Cloud Platform (BigQuery), improving query performance by 60%",
                "Developed real-time fraud detection system using Kafka and Python, preventing $2M+ in fraudulent transactions",
                "Collaborated with data scientists to productionize ML models, serving 10K+ predictions per day",
                "Mentored 3 junior engineers on best practices for data engineering and code review processes",
              ]),
            },
            ExperienceEntry {
              company:    "TechStart Solutions".into(),
              title:      "Junior Data Analyst".into(),
              location:   "Mississauga, ON".into(),
              start_date: "Jun 2019".into(),
              end_date:   "Dec 2020".into(),
              bullets:    strings(&[
                "Created automated reporting dashboards using Python and Tableau, saving 20 hours/week of manual work",
                "Performed exploratory data analysis on customer behavior data to identify growth opportunities",
                "Optimized SQL queries reducing report generation time from 45 minutes to 5 minutes",
                "Collaborated with marketing team to build customer segmentation model using K-means clustering",
              ]),
            },
          ],
        })),
        Section::new(SectionContent::Projects(ProjectsContent {
          entries: vec![
            ProjectEntry {
              name:         "Real-Time Stock Analytics Platform".into(),
              description:  strings(&[
                "Built end-to-end data pipeline ingesting real-time stock data from multiple APIs using Python and Kafka",
                "Implemented streaming analytics with Apache Flink to detect price anomalies and trading patterns",
                "Created interactive dashboard with React and D3.js serving 1000+ concurrent users",
                "Deployed on AWS using Docker and ECS with 99.9% uptime over 6 months",
              ]),
              technologies: Some(
                "Python, Kafka, Apache Flink, React, AWS, Docker, PostgreSQL"
                  .into(),
              ),
              link:         Some(
                "https://github.com/priyasharma/stock-analytics".into(),
              ),
              date:         Some("2024".into()),
            },
            ProjectEntry {
              name:         "Canadian Job Market Analysis Tool".into(),
              description:  strings(&[
                "Scraped 50K+ job postings from Canadian job boards using Python and BeautifulSoup",
                "Built ETL pipeline with Airflow to clean, transform, and load data into PostgreSQL database",
                "Performed NLP analysis using spaCy to extract skill requirements and salary trends",
                "Created public-facing insights dashboard helping 500+ job seekers understand market demands",
              ]),
              technologies: Some(
                "Python, Airflow, PostgreSQL, spaCy, Pandas, Plotly".into(),
              ),
              link:         Some(
                "https://github.com/priyasharma/job-market-analysis".into(),
              ),
              date:         Some("2023".into()),
            },
            ProjectEntry {
              name:         "E-commerce Recommendation Engine".into(),
              description:  strings(&[
                "Developed collaborative filtering recommendation system using Python and Surprise library",
                "Processed 1M+ user interactions to generate personalized product recommendations",
                "Implemented A/B testing framework showing 25% increase in click-through rate",
                "Deployed FastAPI backend serving recommendations with <100ms latency",
              ]),
              technologies: Some(
                "Python, Surprise, FastAPI, Redis, MongoDB, Docker".into(),
              ),
              link:         Some(
                "https://github.com/priyasharma/ecommerce-recommendations"
                  .into(),
              ),
              date:         Some("2023".into()),
            },
          ],
        })),
        Section::new(SectionContent::Volunteer(VolunteerContent {
          entries: vec![
            VolunteerEntry {
              organization: "Girls Who Code Toronto".into(),
              title:        "Volunteer Mentor".into(),
              location:     Some("Toronto, ON".into()),
              start_date:   "Sep 2022".into(),
              end_date:     "Present".into(),
              bullets:      strings(&[
                "Mentor 15 high school students in Python programming and data science fundamentals",
                "Organize monthly coding workshops covering topics from web scraping to machine learning",
                "Help students build portfolio projects and prepare for tech internships",
              ]),
            },
            VolunteerEntry {
              organization: "Data for Good Canada".into(),
              title:        "Data Engineer Volunteer".into(),
              location:     Some("Remote".into()),
              start_date:   "Mar 2021".into(),
              end_date:     "Aug 2022".into(),
              bullets:      strings(&[
                "Built data pipeline for nonprofit analyzing housing affordability across Canadian cities",
                "Automated data collection from government APIs saving 30 hours/month of manual work",
                "Created visualization dashboard used by policy makers to inform housing decisions",
              ]),
            },
          ],
        })),
        Section::new(SectionContent::Education(EducationContent {
          entries: vec![
            EducationEntry {
              institution: "University of Toronto".into(),
              degree:      "Bachelor of Science in Computer Science".into(),
              start_date:  "2015".into(),
              end_date:    "2019".into(),
            },
            EducationEntry {
              institution: "DataCamp".into(),
              degree:      "Data Engineer Professional Certificate".into(),
              start_date:  "2020".into(),
              end_date:    "2020".into(),
            },
          ],
        })),
      ],
    }
  }
}

impl ExperienceEntry {
  /// An empty entry with one empty bullet, as added by the editor.
  pub fn blank() -> Self {
    Self {
      bullets: vec![String::new()],
      ..Default::default()
    }
  }
}

impl ProjectEntry {
  pub fn blank() -> Self {
    Self {
      description: vec![String::new()],
      ..Default::default()
    }
  }
}

impl VolunteerEntry {
  pub fn blank() -> Self {
    Self {
      bullets: vec![String::new()],
      ..Default::default()
    }
  }
}

fn category(name: &str, skills: &str) -> SkillCategory {
  SkillCategory {
    name:   name.into(),
    skills: skills.into(),
  }
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::SectionType;

  #[test]
  fn skeleton_has_one_visible_section_per_type_in_catalog_order() {
    let doc = Document::skeleton();
    let kinds: Vec<_> = doc.sections.iter().map(Section::kind).collect();
    assert_eq!(kinds, SectionType::all().collect::<Vec<_>>());
    assert!(doc.sections.iter().all(|s| s.visible));
    assert!(doc.sections.iter().all(|s| s.id == s.kind().to_string()));
  }

  #[test]
  fn skeleton_lists_each_hold_one_item() {
    let doc = Document::skeleton();
    for section in &doc.sections {
      match &section.content {
        SectionContent::ProfileSummary(s) => {
          assert_eq!(s.format, SummaryFormat::Paragraph)
        }
        SectionContent::TechSkills(t) => {
          assert_eq!(t.categories.len(), 1);
          assert_eq!(t.categories[0].name, DEFAULT_CATEGORY_NAME);
        }
        SectionContent::Experience(e) => {
          assert_eq!(e.entries.len(), 1);
          assert_eq!(e.entries[0].bullets, vec![String::new()]);
        }
        SectionContent::Projects(p) => {
          assert_eq!(p.entries.len(), 1);
          assert_eq!(p.entries[0].description.len(), 1);
        }
        SectionContent::Volunteer(v) => assert_eq!(v.entries.len(), 1),
        SectionContent::Education(e) => assert_eq!(e.entries.len(), 1),
      }
    }
  }

  #[test]
  fn demo_survives_json_round_trip() {
    let demo = Document::demo();
    let json = demo.to_json_pretty().unwrap();
    let back = Document::from_json(&json).unwrap();
    assert_eq!(back, demo);
  }
}
