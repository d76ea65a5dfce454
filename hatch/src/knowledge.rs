use serde::{Deserialize, Serialize};

/// Site-owner content the terminal can answer about without going remote.
/// Loaded from config so the lookup logic stays independent of any one person.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub description: String,
    pub background: String,
    pub skills: Skills,
    pub links: Links,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Skills {
    pub technical: Vec<String>,
    pub leadership: Vec<String>,
    pub ai: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Links {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Quinn Fahey".into(),
            role: "Solutions Architect at Shopify".into(),
            description: "Passionate about using technology to build solutions that solve \
                          real-world problems. Obsessed with AI and the future of intelligent \
                          systems."
                .into(),
            background: "Hi, I'm Quinn Fahey, a passionate Frontend Developer with expertise in \
                         creating beautiful and functional user interfaces."
                .into(),
            skills: Skills {
                technical: ["GraphQL", "REST APIs", "JavaScript", "Python", "PHP", "C#", "CSS"]
                    .map(String::from)
                    .to_vec(),
                leadership: [
                    "Strategic Thinking",
                    "Project Management",
                    "Architecture",
                    "Team Leadership",
                ]
                .map(String::from)
                .to_vec(),
                ai: ["GPT", "LangChain", "Agentic workflows", "Prompt Engineering"]
                    .map(String::from)
                    .to_vec(),
            },
            links: Links {
                github: "https://github.com/quinnfahey".into(),
                linkedin: "https://linkedin.com/in/quinnfahey".into(),
                twitter: "https://twitter.com/quinn_fahey".into(),
            },
        }
    }
}

struct Group {
    keywords: &'static [&'static str],
    response: String,
}

/// Canned-response table consulted before any remote call. Groups are scanned
/// in a fixed order and the first keyword hit wins, so a message mentioning
/// both "about" and "work" always gets the about answer.
pub struct LocalKnowledge {
    groups: Vec<Group>,
}

impl LocalKnowledge {
    pub fn from_profile(profile: &Profile) -> Self {
        let skills = format!(
            "As {}, I specialize in the following areas:\n\n\
             Technical Skills:\n{}\n\n\
             Leadership Experience:\n{}\n\n\
             AI & Emerging Technologies:\n{}\n\n\
             These skills reflect my professional experience and areas of expertise. \
             Feel free to ask me more about any specific skill or area!",
            profile.name,
            profile.skills.technical.join(", "),
            profile.skills.leadership.join(", "),
            profile.skills.ai.join(", "),
        );
        let about = format!(
            "{} In my current role as {}, {}",
            profile.background, profile.role, profile.description
        );
        let role = format!(
            "I'm currently working as {}. {}",
            profile.role, profile.description
        );
        let contact = format!(
            "You can connect with me ({}) on:\nGitHub: {}\nLinkedIn: {}\nTwitter: {}",
            profile.name, profile.links.github, profile.links.linkedin, profile.links.twitter
        );

        Self {
            groups: vec![
                Group {
                    keywords: &["skills", "technologies"],
                    response: skills,
                },
                // Self-referential phrases only: a bare "about" would swallow
                // unrelated questions like "tell me about the weather".
                Group {
                    keywords: &["about you", "about yourself", "background", "experience", "who are you"],
                    response: about,
                },
                Group {
                    keywords: &["role", "work"],
                    response: role,
                },
                Group {
                    keywords: &["contact", "links"],
                    response: contact,
                },
            ],
        }
    }

    /// Case-insensitive substring scan. `None` means the caller should go remote.
    pub fn lookup(&self, message: &str) -> Option<&str> {
        let message = message.to_lowercase();
        self.groups
            .iter()
            .find(|group| group.keywords.iter().any(|k| message.contains(k)))
            .map(|group| group.response.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knowledge() -> LocalKnowledge {
        LocalKnowledge::from_profile(&Profile::default())
    }

    #[test]
    fn skills_answer_lists_all_three_areas() {
        let kb = knowledge();
        let answer = kb.lookup("what skills do you have").unwrap();
        assert!(answer.contains("Technical Skills:"));
        assert!(answer.contains("Leadership Experience:"));
        assert!(answer.contains("AI & Emerging Technologies:"));
        assert!(answer.contains("GraphQL"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let kb = knowledge();
        assert!(kb.lookup("TELL ME ABOUT YOURSELF").is_some());
    }

    #[test]
    fn weather_question_goes_remote() {
        let kb = knowledge();
        assert!(kb.lookup("tell me about the weather today").is_none());
    }

    #[test]
    fn about_wins_over_role_when_both_match() {
        let kb = knowledge();
        let answer = kb.lookup("tell me about your work").unwrap();
        assert!(answer.starts_with("Hi, I'm"));
    }

    #[test]
    fn skills_outrank_every_other_group() {
        let kb = knowledge();
        let answer = kb
            .lookup("skills, background, work and contact please")
            .unwrap();
        assert!(answer.contains("Technical Skills:"));
    }

    #[test]
    fn role_and_contact_groups_answer() {
        let kb = knowledge();
        assert!(kb.lookup("where do you work").unwrap().starts_with("I'm currently working as"));
        assert!(kb.lookup("got any links?").unwrap().contains("GitHub:"));
    }

    #[test]
    fn unrelated_message_misses() {
        let kb = knowledge();
        assert!(kb.lookup("what time is it").is_none());
    }

    #[test]
    fn profile_round_trips_through_json() {
        let profile = Profile::default();
        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, profile.name);
        assert_eq!(back.skills.technical, profile.skills.technical);
    }
}
