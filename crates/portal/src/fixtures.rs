//! Demo portal content.

use crate::catalog::{Academic, Catalog, Event, EventCatalog, FacultyMember, ResourceLinks};

fn placeholder_links() -> ResourceLinks {
    ResourceLinks {
        pdf: "#".into(),
        youtube: "#".into(),
        drive: "#".into(),
    }
}

fn event(name: &str, date: &str, description: &str) -> Event {
    Event {
        name: name.into(),
        date: date.into(),
        description: description.into(),
    }
}

pub fn catalog() -> Catalog {
    Catalog {
        academics: vec![
            Academic {
                title: "Engineering Mathematics-I".into(),
                faculty: "Dr. Anuj Kumar".into(),
                description: "Core concepts of calculus, matrices, and differential equations.".into(),
                branch: "CS/IT/EC".into(),
                color: "blue-500".into(),
                links: placeholder_links(),
                keywords: "engineering mathematics-i dr. anuj kumar".into(),
            },
            Academic {
                title: "Programming for Problem Solving".into(),
                faculty: "Prof. Shweta Sharma".into(),
                description: "Introduction to C programming, loops, arrays, and functions.".into(),
                branch: "CS/IT".into(),
                color: "green-500".into(),
                links: placeholder_links(),
                keywords: "programming for problem solving prof. shweta sharma".into(),
            },
        ],
        faculty: vec![
            FacultyMember {
                name: "Prof. Ritu Singh".into(),
                title: "Ph.D, M.Tech (HOD, B.tech First year)".into(),
                subjects: "Engineering Maths, Data Structures".into(),
                email: "ritu.s@srms.ac.in".into(),
                linkedin: "#".into(),
                img: "https://placehold.co/150x150/667eea/FFFFFF/png?text=RS".into(),
                keywords: "prof ritu singh hod b.tech first year engineering maths data structures".into(),
            },
            FacultyMember {
                name: "Prof. Ashutosh Pandey".into(),
                title: "M.Tech (CSE)".into(),
                subjects: "C Programming, Web Tech".into(),
                email: "ashutosh.p@srms.ac.in".into(),
                linkedin: "#".into(),
                img: "https://placehold.co/150x150/794acf/FFFFFF/png?text=AP".into(),
                keywords: "prof ashutosh pandey cse c programming web tech".into(),
            },
        ],
        events: EventCatalog {
            tech: vec![event(
                "CodeClash 2025",
                "Aug 15, 2025",
                "A competitive programming contest for all students.",
            )],
            cultural: vec![event(
                "Spandan - Annual Fest",
                "Oct 10, 2025",
                "The biggest cultural extravaganza of the year.",
            )],
            fest: vec![event(
                "Zest - Sports Fest",
                "Nov 20, 2025",
                "Get ready for a week of intense sporting action.",
            )],
        },
    }
}
