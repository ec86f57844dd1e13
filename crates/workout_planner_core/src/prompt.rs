use crate::contract::UserProfile;

/// Render the plan-generation prompt. Pure function of its inputs.
pub fn build_prompt(profile: &UserProfile, exercise_names: &[String]) -> String {
    let demographics = format!(
        "Age: {} years,\nGender: {},\nHeight: {} inches,\nWeight: {} pounds \n",
        profile.age,
        profile.sex,
        profile.total_height_inches(),
        profile.weight,
    );

    format!(
        "Create a daily {workout_time} minute {fitness_level} workout plan \
         featuring 10 exercises with the following user criteria:\n\
         {demographics}\
         Preferred body parts that the user would like to focus on {body_parts}\n\
         Preferred muscle groups that the user would like to focus on {muscle_groups}\n\
         Suggested exercises based on an expert source:\n\
         {exercises}\n\
         Provide specific reps, or duration if applicable, sets, intensity, rest periods, \
         and instructions for each exercise based on the user demographics and preferences",
        workout_time = profile.workout_time,
        fitness_level = profile.fitness_level,
        body_parts = profile.body_areas.join(", "),
        muscle_groups = profile.muscle_groups.join(", "),
        exercises = exercise_names.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            age: 34,
            weight: 165,
            height_feet: 5,
            height_inches: 8,
            sex: "female".to_string(),
            workout_time: 30,
            fitness_level: "beginner".to_string(),
            body_areas: vec!["back".to_string(), "chest".to_string()],
            muscle_groups: vec!["lats".to_string(), "pectorals".to_string()],
        }
    }

    #[test]
    fn renders_full_template() {
        let prompt = build_prompt(
            &sample_profile(),
            &["pull-up".to_string(), "push-up".to_string()],
        );

        let expected = "Create a daily 30 minute beginner workout plan featuring 10 exercises with the following user criteria:\n\
                        Age: 34 years,\n\
                        Gender: female,\n\
                        Height: 68 inches,\n\
                        Weight: 165 pounds \n\
                        Preferred body parts that the user would like to focus on back, chest\n\
                        Preferred muscle groups that the user would like to focus on lats, pectorals\n\
                        Suggested exercises based on an expert source:\n\
                        pull-up, push-up\n\
                        Provide specific reps, or duration if applicable, sets, intensity, rest periods, and instructions for each exercise based on the user demographics and preferences";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn empty_exercise_list_leaves_blank_line() {
        let prompt = build_prompt(&sample_profile(), &[]);
        assert!(prompt.contains("expert source:\n\nProvide specific reps"));
    }

    #[test]
    fn renders_exact_height_for_huge_feet() {
        let profile = UserProfile {
            height_feet: 1_000_000_000_000_000_000,
            height_inches: 10,
            ..sample_profile()
        };
        let prompt = build_prompt(&profile, &[]);
        assert!(prompt.contains("Height: 12000000000000000010 inches,"));
    }

    #[test]
    fn identical_inputs_render_identical_prompts() {
        let names = vec!["row".to_string()];
        assert_eq!(
            build_prompt(&sample_profile(), &names),
            build_prompt(&sample_profile(), &names)
        );
    }
}
