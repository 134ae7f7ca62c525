use crate::models::popularity::PopularityScore;
use crate::models::post::Post;
use crate::models::user::User;

/// Normalized like score per post: likes divided by (total users - 1), i.e.
/// the share of *other* users that liked the post.
///
/// The result keeps IEEE float semantics on purpose. With a single user the
/// denominator is zero, so a liked post scores +inf (inf passes the `>= 0`
/// keep-check) while an unliked one is 0/0 = NaN and gets clamped to 0. With
/// no users at all the denominator is -1 and every positive like count goes
/// negative, which also clamps to 0.
///
/// Pure: inputs are never mutated, output has one entry per post in input
/// order, and repeated calls with the same snapshots return the same scores.
pub fn compute_popularity(posts: &[Post], users: &[User]) -> Vec<PopularityScore> {
    let denominator = users.len() as f64 - 1.0;
    posts
        .iter()
        .map(|post| {
            let raw = post.like_count() as f64 / denominator;
            PopularityScore {
                id: post.id,
                popularity: if raw >= 0.0 { raw } else { 0.0 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::like::Like;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "x".to_string(),
            role: "user".to_string(),
            banned: false,
        }
    }

    fn post_with_likes(title: &str, like_count: usize) -> Post {
        let id = Uuid::new_v4();
        let likes = if like_count == 0 {
            None
        } else {
            Some(
                (0..like_count)
                    .map(|_| Like {
                        id: Uuid::new_v4(),
                        user_id: Uuid::new_v4(),
                        post_id: id,
                        created_at: Utc::now(),
                    })
                    .collect(),
            )
        };
        Post {
            id,
            title: title.to_string(),
            content: None,
            deleted: false,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            author_name: "author".to_string(),
            likes,
        }
    }

    #[test]
    fn scores_are_likes_over_other_users() {
        let posts = vec![
            post_with_likes("a", 2),
            post_with_likes("b", 1),
            post_with_likes("c", 0),
        ];
        let users = vec![user("u1"), user("u2"), user("u3")];

        let scores = compute_popularity(&posts, &users);

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].popularity, 1.0);
        assert_eq!(scores[1].popularity, 0.5);
        assert_eq!(scores[2].popularity, 0.0);
        // output follows input order, not score order
        assert_eq!(scores[0].id, posts[0].id);
        assert_eq!(scores[1].id, posts[1].id);
        assert_eq!(scores[2].id, posts[2].id);
    }

    #[test]
    fn single_user_unliked_post_clamps_nan_to_zero() {
        // 0 likes / 0 other users = 0/0 = NaN, which fails `>= 0`
        let posts = vec![post_with_likes("a", 0)];
        let users = vec![user("only")];

        let scores = compute_popularity(&posts, &users);
        assert_eq!(scores[0].popularity, 0.0);
        assert!(!scores[0].popularity.is_nan());
    }

    #[test]
    fn single_user_liked_post_is_infinity() {
        // x/0 = +inf passes the `>= 0` check and is returned as-is
        let posts = vec![post_with_likes("a", 2), post_with_likes("b", 1)];
        let users = vec![user("only")];

        let scores = compute_popularity(&posts, &users);
        assert!(scores[0].popularity.is_infinite() && scores[0].popularity > 0.0);
        assert!(scores[1].popularity.is_infinite() && scores[1].popularity > 0.0);
    }

    #[test]
    fn no_users_clamps_everything_to_zero() {
        // denominator -1: positive like counts go negative and clamp,
        // zero like counts give 0/-1 = -0.0 which still compares equal to 0
        let posts = vec![post_with_likes("a", 3), post_with_likes("b", 0)];
        let users: Vec<User> = vec![];

        let scores = compute_popularity(&posts, &users);
        assert_eq!(scores[0].popularity, 0.0);
        assert_eq!(scores[1].popularity, 0.0);
    }

    #[test]
    fn empty_post_list_gives_empty_result() {
        let users = vec![user("u1"), user("u2")];
        assert!(compute_popularity(&[], &users).is_empty());
    }

    #[test]
    fn scores_are_never_negative_with_multiple_users() {
        let posts: Vec<Post> = (0..10).map(|i| post_with_likes("p", i)).collect();
        let users = vec![user("u1"), user("u2"), user("u3"), user("u4")];

        for score in compute_popularity(&posts, &users) {
            assert!(score.popularity >= 0.0);
        }
    }

    #[test]
    fn recomputing_unchanged_inputs_is_identical() {
        let posts = vec![post_with_likes("a", 2), post_with_likes("b", 0)];
        let users = vec![user("u1"), user("u2")];

        let first = compute_popularity(&posts, &users);
        let second = compute_popularity(&posts, &users);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.popularity, b.popularity);
        }
    }
}
