//! Icon and brand color lookup for technology badges.
//!
//! The catalog is a pair of plain tables. Unknown names fall back to the
//! generic `code` icon and the inherited text color.

use serde::Serialize;

/// Presentation hints for one technology badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

pub const DEFAULT_ICON: &str = "code";
pub const DEFAULT_COLOR: &str = "currentColor";

const ICONS: &[(&str, &str)] = &[
    ("React", "react"),
    ("Next.js", "nextdotjs"),
    ("TypeScript", "typescript"),
    ("Tailwind CSS", "tailwindcss"),
    ("Vue.js", "vuedotjs"),
    ("JavaScript", "javascript"),
    ("Node.js", "nodedotjs"),
    ("Python", "python"),
    ("PostgreSQL", "postgresql"),
    ("MongoDB", "mongodb"),
    ("GraphQL", "graphql"),
    ("Git", "git"),
    ("Docker", "docker"),
    ("AWS", "amazonwebservices"),
    ("Vercel", "vercel"),
    ("Figma", "figma"),
    ("Linux", "linux"),
    ("LeetCode", "leetcode"),
    ("SolidWorks", "autodesk"),
    ("AutoCAD", "autodesk"),
    ("Fusion 360", "autodesk"),
    ("ANSYS", "ansys"),
    ("Arduino", "arduino"),
    ("Raspberry Pi", "raspberrypi"),
    ("REST APIs", "server"),
    ("System Design", "settings"),
    ("Testing", "target"),
    ("Agile", "lightbulb"),
    ("DevOps", "settings"),
    ("UI/UX", "lightbulb"),
    ("CNC Programming", "cpu"),
    ("3D Printing", "settings"),
    ("Quality Control", "target"),
    ("Lean Manufacturing", "bar-chart"),
    ("FEA", "bar-chart"),
    ("CFD", "zap"),
    ("Thermal Analysis", "zap"),
    ("Creo", "wrench"),
    ("Six Sigma", "target"),
    ("Cost Estimation", "bar-chart"),
    ("Supply Chain", "settings"),
    ("Project Management", "target"),
    ("Thermodynamics", "zap"),
    ("Energy Systems", "zap"),
    ("Heat Transfer", "zap"),
    ("Flow Analysis", "zap"),
    ("Heat Exchangers", "wrench"),
    ("LMTD Analysis", "bar-chart"),
    ("Automotive HVAC", "settings"),
    ("Thermal Design", "zap"),
    ("Energy Recovery", "zap"),
    ("Materials Science", "wrench"),
    ("Metrology", "target"),
    ("Robotics", "cpu"),
    ("Computer Vision", "target"),
    ("PLC Programming", "code"),
    ("SCADA", "settings"),
    ("IoT", "cpu"),
    ("Control Systems", "settings"),
    ("Energy Modeling", "bar-chart"),
    ("Prototyping", "wrench"),
    ("High-Performance Computing", "cpu"),
    ("Turbomachinery", "wrench"),
    ("MATLAB", "bar-chart"),
];

const COLORS: &[(&str, &str)] = &[
    ("React", "#61DAFB"),
    ("Next.js", "#000000"),
    ("TypeScript", "#3178C6"),
    ("Tailwind CSS", "#06B6D4"),
    ("Vue.js", "#4FC08D"),
    ("JavaScript", "#F7DF1E"),
    ("Node.js", "#339933"),
    ("Python", "#3776AB"),
    ("PostgreSQL", "#336791"),
    ("MongoDB", "#47A248"),
    ("GraphQL", "#E10098"),
    ("Git", "#F05032"),
    ("Docker", "#2496ED"),
    ("AWS", "#FF9900"),
    ("Vercel", "#000000"),
    ("Figma", "#F24E1E"),
    ("Linux", "#FCC624"),
    ("LeetCode", "#FFA116"),
    ("SolidWorks", "#FF0000"),
    ("AutoCAD", "#E51937"),
    ("Fusion 360", "#FF6600"),
    ("ANSYS", "#FFB71B"),
    ("MATLAB", "#0076A8"),
    ("Arduino", "#00979D"),
    ("Raspberry Pi", "#A22846"),
];

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == name).map(|(_, v)| *v)
}

/// Returns the badge style for `name`; exact, case-sensitive match.
pub fn tech_style(name: &str) -> TechStyle {
    TechStyle {
        icon: lookup(ICONS, name).unwrap_or(DEFAULT_ICON),
        color: lookup(COLORS, name).unwrap_or(DEFAULT_COLOR),
    }
}
