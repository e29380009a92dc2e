use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::{
    entity::{Coupons, coupons::Column as CouponCol, coupons::Model as CouponModel},
    error::{AppError, AppResult},
};

/// Amount a coupon takes off `total`, never more than `total` itself.
pub async fn discount_for<C>(conn: &C, code: &str, total: i64) -> AppResult<i64>
where
    C: ConnectionTrait,
{
    let coupon = Coupons::find()
        .filter(CouponCol::Code.eq(code.trim()))
        .filter(CouponCol::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid coupon".into()))?;

    discount_amount(&coupon, total)
}

pub fn discount_amount(coupon: &CouponModel, total: i64) -> AppResult<i64> {
    let raw = match coupon.discount_type.as_str() {
        "fixed" => coupon.value,
        "percent" => total.saturating_mul(coupon.value.clamp(0, 100)) / 100,
        other => {
            tracing::warn!(code = %coupon.code, discount_type = other, "unknown coupon type");
            return Err(AppError::BadRequest("Invalid coupon".into()));
        }
    };
    Ok(raw.clamp(0, total.max(0)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn coupon(discount_type: &str, value: i64) -> CouponModel {
        CouponModel {
            id: Uuid::new_v4(),
            code: "SAVE".into(),
            discount_type: discount_type.into(),
            value,
            is_active: true,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn fixed_discount_is_capped_at_total() {
        assert_eq!(discount_amount(&coupon("fixed", 500), 2000).unwrap(), 500);
        assert_eq!(discount_amount(&coupon("fixed", 5000), 2000).unwrap(), 2000);
    }

    #[test]
    fn percent_discount_floors() {
        assert_eq!(discount_amount(&coupon("percent", 10), 1999).unwrap(), 199);
        assert_eq!(discount_amount(&coupon("percent", 150), 1000).unwrap(), 1000);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            discount_amount(&coupon("bogus", 1), 100),
            Err(AppError::BadRequest(_))
        ));
    }
}
