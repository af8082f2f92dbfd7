/// Skills picked while building a job posting. Insertion ordered, no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobSkills {
	skills: Vec<String>,
}

impl JobSkills {
	/// Returns `false` if the skill was already there.
	pub fn insert(&mut self, skill: &str) -> bool {
		if self.contains(skill) {
			return false;
		}
		self.skills.push(skill.to_owned());
		true
	}

	/// Returns `false` if the skill was not there.
	pub fn remove(&mut self, skill: &str) -> bool {
		let before = self.skills.len();
		self.skills.retain(|s| s != skill);
		self.skills.len() != before
	}

	/// Exact label match.
	pub fn contains(&self, skill: &str) -> bool {
		self.skills.iter().any(|s| s == skill)
	}

	/// Skills in the order they were picked.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.skills.iter().map(String::as_str)
	}

	/// Value of the hidden `jobSkills` form field.
	pub fn joined(&self) -> String {
		self.skills.join(",")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_semantics_with_insertion_order() {
		let mut skills = JobSkills::default();
		assert!(skills.insert("python"));
		assert!(skills.insert("SQL"));
		assert!(!skills.insert("python"));
		assert_eq!(skills.joined(), "python,SQL");
		assert!(skills.remove("python"));
		assert!(!skills.remove("python"));
		assert_eq!(skills.iter().collect::<Vec<_>>(), ["SQL"]);
	}
}
